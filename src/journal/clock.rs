//! # Reloj
//! src/journal/clock.rs
//!
//! Fuente del instante de captura de cada entrada. El store recibe el reloj
//! por constructor para que los tests puedan fijar el segundo exacto.

use chrono::{DateTime, Utc};

/// Fuente de "ahora" en UTC
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reloj real del sistema
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
