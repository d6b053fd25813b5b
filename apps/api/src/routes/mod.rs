//! # HTTP Routes
//!
//! Handlers are thin: decode the request, call the engine or a repository,
//! encode the result. Every handler returns `ApiResult<T>`.
//!
//! ## Available Routes
//!
//! | Module       | Routes                                               |
//! |--------------|------------------------------------------------------|
//! | `quotations` | `/quotations`, `/api/cotizaciones` (+ `/{id}`)       |
//! | `clients`    | `/api/clientes` (+ `/{id}`)                          |
//! | `services`   | `/api/servicios` (+ `/{id}`)                         |
//! | `status`     | `/api/status`                                        |

pub mod clients;
pub mod quotations;
pub mod services;
pub mod status;

use serde::Serialize;

/// Confirmation body returned by every DELETE route.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}
