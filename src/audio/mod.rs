mod cpal_backend;
pub use self::cpal_backend::CpalBackend;

use anyhow::Result;

pub trait AudioBackend {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}
