//! Vistas del front end
//!
//! Cada vista posee un `CancellationToken`; al desmontarla (`teardown`) las
//! llamadas en curso se descartan y no modifican su estado.

pub mod truck_form;
pub mod truck_list;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::utils::errors::{ApiResult, ViewError, ViewResult};

pub use truck_form::{FormField, FormMode, SubmitOutcome, TruckForm};
pub use truck_list::{DeleteOutcome, TruckList};

/// Ejecutar una llamada a la API ligada a la vida de la vista
pub(crate) async fn guarded<T, F>(cancel: &CancellationToken, call: F) -> ViewResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ViewError::Cancelled),
        result = call => result.map_err(ViewError::from),
    }
}
