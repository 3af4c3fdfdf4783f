//! TMP102 hardware source.

use super::ReadingSource;
use thermo_hw::Tmp102;

impl ReadingSource for Tmp102 {
    fn name(&self) -> &str {
        "tmp102"
    }

    fn read(&mut self) -> thermo_hw::Result<f64> {
        self.read_temperature().map(f64::from)
    }
}
