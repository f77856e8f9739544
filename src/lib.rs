pub mod seq;
pub mod error;
pub mod zip;

pub mod seq_configuration;
pub mod seq_ext;

// Re-export all items from seq module at the crate root
pub use seq::*;
pub use zip::{zip, zip_with_config};
pub use error::{SeqError, SeqResult};
pub use seq_configuration::ZipConfig;
pub use seq_ext::{PairSeqExt, SeqExt};

/// Build a sequence from a list of elements, like `vec!`
///
/// ```
/// use lazyseq::*;
///
/// # async fn example() {
/// assert_eq!(collect(&seq![1, 2, 3]).await, vec![1, 2, 3]);
/// # }
/// ```
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::from_elements(::std::vec![$($item),*])
    };
}
