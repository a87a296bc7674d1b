pub mod element;
pub mod error;
pub mod function;
pub mod relation;
pub mod set;
pub mod storage;
/// The `math_core` crate provides the immutable value types at the base of the math research
/// platform: finite sets, binary relations between them, and (partial) functions.
///
/// Every value is validated when it is constructed and never mutated afterwards; all operations
/// return freshly built values, so everything here is `Send + Sync` and safe to share.
///
/// Key components:
/// - **Traits**: `Element` (hashable members), `SetLike`, `RelationLike`, `PairStore` (storage).
/// - **Set**: `MathSet` with the Boolean set algebra.
/// - **Relation**: `MathRelation` with composition, inverse, images and order predicates.
/// - **Function**: `MathFunction`, a single-valued relation with application and composition.
/// - **Storage**: hashed, dense (`nalgebra`) and sparse (`nalgebra-sparse`) pair encodings.
pub mod traits;
