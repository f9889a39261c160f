mod product;
pub use product::ProductIndex;

mod union;

mod subset;
pub use subset::{DeterminizeOptions, Determinized};

mod concatenation;

mod complement;

mod trim;

mod simulation;

mod segmentation;
pub use segmentation::Segmentation;

mod noodlify;
pub use noodlify::{Noodle, Reduction};
