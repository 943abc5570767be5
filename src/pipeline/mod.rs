// The two pipeline stages, composed sequentially by main: collect walks
// the paginated listing under a stopping policy, aggregate folds the
// result into the derived views.

pub mod aggregate;
pub mod collect;
pub mod policy;
