//! sb-downmix: ITU-R BS.775 fold-down from 7.1.4 to 5.1

mod downmix;

pub use downmix::downmix_714_to_51;
