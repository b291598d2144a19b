//! Canal de notificaciones (toasts)
//!
//! Lista ordenada de toasts activos, compartida por todas las vistas a través
//! de un handle clonable. Los suscriptores observan cada cambio mediante un
//! canal `watch`; soltar el receptor cancela la suscripción.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Tipo de notificación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    /// Duración por defecto en milisegundos
    pub fn default_duration_ms(&self) -> u64 {
        match self {
            ToastKind::Success => 5000,
            ToastKind::Warning => 6000,
            ToastKind::Error => 8000,
            ToastKind::Info => 5000,
        }
    }
}

/// Notificación efímera
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    /// 0 = no expira nunca
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Servicio de toasts compartido
#[derive(Clone)]
pub struct ToastService {
    sender: Arc<watch::Sender<Vec<Toast>>>,
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastService {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Suscribirse a la lista de toasts activos
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.sender.subscribe()
    }

    /// Copia de los toasts activos en orden de inserción
    pub fn toasts(&self) -> Vec<Toast> {
        self.sender.borrow().clone()
    }

    pub fn show_success(&self, title: &str, message: &str, details: Option<String>) -> String {
        self.show(ToastKind::Success, title, message, details, None)
    }

    pub fn show_error(&self, title: &str, message: &str, details: Option<String>) -> String {
        self.show(ToastKind::Error, title, message, details, None)
    }

    pub fn show_warning(&self, title: &str, message: &str, details: Option<String>) -> String {
        self.show(ToastKind::Warning, title, message, details, None)
    }

    pub fn show_info(&self, title: &str, message: &str, details: Option<String>) -> String {
        self.show(ToastKind::Info, title, message, details, None)
    }

    /// Añadir un toast y devolver su id
    ///
    /// Con duración mayor que cero se programa su eliminación automática;
    /// debe llamarse dentro de un runtime de tokio.
    pub fn show(
        &self,
        kind: ToastKind,
        title: &str,
        message: &str,
        details: Option<String>,
        duration_ms: Option<u64>,
    ) -> String {
        let duration_ms = duration_ms.unwrap_or_else(|| kind.default_duration_ms());
        let toast = Toast {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            details,
            duration_ms,
            timestamp: Utc::now(),
        };
        let id = toast.id.clone();

        debug!("🔔 Toast {:?} '{}' ({} ms)", kind, toast.title, duration_ms);
        self.sender.send_modify(|toasts| toasts.push(toast));

        if duration_ms > 0 {
            let service = self.clone();
            let expiring = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                service.dismiss(&expiring);
            });
        }

        id
    }

    /// Eliminar un toast por id; devuelve si existía
    pub fn dismiss(&self, id: &str) -> bool {
        self.sender.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|toast| toast.id != id);
            toasts.len() != before
        })
    }
}
