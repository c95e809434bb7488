pub mod gemini;

pub use gemini::{gateway, BrowserCredentials};
