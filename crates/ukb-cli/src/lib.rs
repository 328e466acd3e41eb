//! Library side of the `ukb-pheno` binary.

pub mod logging;
pub mod pipeline;
