//! Client for the generative-text service that writes the free-form health
//! advice shown next to a risk assessment.

mod config;
mod error;
mod generator;
mod http;
mod http_utils;
mod prompt;

pub use config::{AdviceConfig, AdviceSettings, Provider};
pub use error::{AdviceError, ErrorKind};
pub use generator::{AdviceGenerator, UnconfiguredAdvice};
pub use http::HttpAdviceGenerator;
pub use prompt::build_prompt;
