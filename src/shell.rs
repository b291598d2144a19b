//! Shell de terminal
//!
//! Monta la vista de la ruta actual, muestra los toasts activos y traduce
//! los comandos del usuario en operaciones de las vistas. Al salir de una
//! vista se desmonta (`teardown`) y sus respuestas pendientes se descartan.

use std::future::Future;
use std::io::Write;

use anyhow::Result;
use colored::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::models::NamedCode;
use crate::routes::Route;
use crate::services::{Toast, ToastKind};
use crate::state::AppState;
use crate::utils::errors::{ViewError, ViewResult};
use crate::views::{DeleteOutcome, FormField, FormMode, SubmitOutcome, TruckForm, TruckList};

/// Comandos de la vista de listado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    New,
    Edit(i64),
    Delete(i64),
    Reload,
    Dismiss(String),
    Quit,
}

impl ListCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let argument = parts.next();
        match (command, argument) {
            ("n", None) => Some(ListCommand::New),
            ("e", Some(id)) => id.parse().ok().map(ListCommand::Edit),
            ("d", Some(id)) => id.parse().ok().map(ListCommand::Delete),
            ("r", None) => Some(ListCommand::Reload),
            ("x", Some(prefix)) => Some(ListCommand::Dismiss(prefix.to_string())),
            ("q", None) => Some(ListCommand::Quit),
            _ => None,
        }
    }
}

/// Comandos del formulario; los índices de lista empiezan en 1 y 0 limpia
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Plate(String),
    Brand(usize),
    Model(usize),
    Year(usize),
    Submit,
    Cancel,
    Dismiss(String),
    Quit,
}

impl FormCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let argument = parts.next();
        match (command, argument) {
            ("p", Some(plate)) => Some(FormCommand::Plate(plate.to_string())),
            ("b", Some(index)) => index.parse().ok().map(FormCommand::Brand),
            ("m", Some(index)) => index.parse().ok().map(FormCommand::Model),
            ("y", Some(index)) => index.parse().ok().map(FormCommand::Year),
            ("s", None) => Some(FormCommand::Submit),
            ("c", None) => Some(FormCommand::Cancel),
            ("x", Some(prefix)) => Some(FormCommand::Dismiss(prefix.to_string())),
            ("q", None) => Some(FormCommand::Quit),
            _ => None,
        }
    }
}

/// Código de la entrada `index` (1-based); 0 = sin selección
fn code_at(entries: &[NamedCode], index: usize) -> Option<String> {
    if index == 0 {
        return Some(String::new());
    }
    entries.get(index - 1).map(|entry| entry.code.clone())
}

/// Ejecutar una operación de vista; Ctrl+C desmonta la vista
async fn interruptible<T, F>(cancel: CancellationToken, call: F) -> ViewResult<T>
where
    F: Future<Output = ViewResult<T>>,
{
    tokio::pin!(call);
    tokio::select! {
        result = &mut call => return result,
        _ = tokio::signal::ctrl_c() => {
            warn!("🛑 Interrupted, tearing down view");
            cancel.cancel();
        }
    }
    call.await
}

/// Pantalla de toasts: imprime la lista cuando cambia
struct ToastDisplay {
    receiver: watch::Receiver<Vec<Toast>>,
}

impl ToastDisplay {
    fn render_changes(&mut self) {
        if !self.receiver.has_changed().unwrap_or(false) {
            return;
        }
        let toasts = self.receiver.borrow_and_update().clone();
        for toast in &toasts {
            let short_id: String = toast.id.chars().take(8).collect();
            let header = format!("[{}] {}", short_id, toast.title);
            let header = match toast.kind {
                ToastKind::Success => header.bright_green().bold(),
                ToastKind::Error => header.bright_red().bold(),
                ToastKind::Warning => header.bright_yellow().bold(),
                ToastKind::Info => header.bright_blue().bold(),
            };
            println!("{} {}", header, toast.message);
            if let Some(details) = &toast.details {
                println!("    {}", details.dimmed());
            }
        }
    }
}

pub struct Shell<R> {
    state: AppState,
    input: Lines<R>,
    toasts: ToastDisplay,
}

impl<R: AsyncBufRead + Unpin> Shell<R> {
    pub fn new(state: AppState, input: R) -> Self {
        let toasts = ToastDisplay {
            receiver: state.toasts.subscribe(),
        };
        Self {
            state,
            input: input.lines(),
            toasts,
        }
    }

    /// Bucle principal: sigue la navegación hasta que el usuario sale
    pub async fn run(mut self) -> Result<()> {
        println!("{}", "🚚 Fleet Management".bright_blue().bold());
        println!("{}", "===================".bright_blue());

        let mut route = self.state.config.start_route;
        loop {
            info!("🧭 Navigating to {}", route);
            let next = match FormMode::from_route(&route) {
                Some(mode) => self.run_form(mode).await?,
                None => self.run_list().await?,
            };
            match next {
                Some(next) => route = next,
                None => break,
            }
        }

        println!("{}", "👋 Bye!".bright_green());
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.toasts.render_changes();
        print!("{}", label.bright_yellow());
        std::io::stdout().flush()?;
        Ok(self.input.next_line().await?)
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{} [y/N] ", question)).await?;
        Ok(matches!(answer.as_deref().map(str::trim), Some("y") | Some("Y")))
    }

    fn dismiss(&self, prefix: &str) {
        let matching: Vec<String> = self
            .state
            .toasts
            .toasts()
            .into_iter()
            .filter(|toast| toast.id.starts_with(prefix))
            .map(|toast| toast.id)
            .collect();
        for id in matching {
            self.state.toasts.dismiss(&id);
        }
    }

    async fn run_list(&mut self) -> Result<Option<Route>> {
        let mut view = TruckList::new(self.state.trucks.clone());
        let cancel = view.cancellation();

        println!("{}", "⏳ Loading trucks...".dimmed());
        if let Err(ViewError::Cancelled) = interruptible(cancel.clone(), view.load()).await {
            return Ok(None);
        }

        loop {
            render_list(&view);
            let Some(line) = self.prompt("trucks> ").await? else {
                view.teardown();
                return Ok(None);
            };

            match ListCommand::parse(&line) {
                Some(ListCommand::New) => {
                    view.teardown();
                    return Ok(Some(view.new_route()));
                }
                Some(ListCommand::Edit(id)) => {
                    match view.trucks().iter().find(|truck| truck.id == id) {
                        Some(truck) => {
                            let next = view.edit_route(truck);
                            view.teardown();
                            return Ok(Some(next));
                        }
                        None => println!("{}", format!("❌ Unknown truck id {}", id).bright_red()),
                    }
                }
                Some(ListCommand::Delete(id)) => {
                    let Some(question) = view.delete_prompt(id) else {
                        println!("{}", format!("❌ Unknown truck id {}", id).bright_red());
                        continue;
                    };
                    let confirmed = self.confirm(&question).await?;
                    match interruptible(cancel.clone(), view.delete(id, |_| confirmed)).await {
                        Ok(DeleteOutcome::Declined) => println!("{}", "Deletion cancelled".dimmed()),
                        Ok(_) | Err(ViewError::Api(_)) => {}
                        Err(ViewError::Cancelled) => return Ok(None),
                    }
                }
                Some(ListCommand::Reload) => {
                    if let Err(ViewError::Cancelled) = interruptible(cancel.clone(), view.retry()).await {
                        return Ok(None);
                    }
                }
                Some(ListCommand::Dismiss(prefix)) => self.dismiss(&prefix),
                Some(ListCommand::Quit) => {
                    view.teardown();
                    return Ok(None);
                }
                None => println!(
                    "{}",
                    "Commands: n | e <id> | d <id> | r | x <toast> | q".dimmed()
                ),
            }
        }
    }

    async fn run_form(&mut self, mode: FormMode) -> Result<Option<Route>> {
        let mut form = TruckForm::new(self.state.trucks.clone(), mode);
        let cancel = form.cancellation();

        render_form(&form);
        if let Err(ViewError::Cancelled) = interruptible(cancel.clone(), form.init()).await {
            return Ok(Some(Route::TruckList));
        }

        loop {
            render_form(&form);
            let Some(line) = self.prompt("truck> ").await? else {
                form.teardown();
                return Ok(None);
            };

            let result = match FormCommand::parse(&line) {
                Some(FormCommand::Plate(plate)) => {
                    form.set_license_plate(&plate);
                    Ok(())
                }
                Some(FormCommand::Brand(index)) => match code_at(form.brands(), index) {
                    Some(code) => interruptible(cancel.clone(), form.select_brand(&code)).await,
                    None => {
                        println!("{}", "❌ No such brand".bright_red());
                        Ok(())
                    }
                },
                Some(FormCommand::Model(index)) => match code_at(form.models(), index) {
                    Some(code) => interruptible(cancel.clone(), form.select_model(&code)).await,
                    None => {
                        println!("{}", "❌ No such model".bright_red());
                        Ok(())
                    }
                },
                Some(FormCommand::Year(index)) => {
                    match code_at(form.years(), index) {
                        Some(code) => form.select_year(&code),
                        None => println!("{}", "❌ No such year".bright_red()),
                    }
                    Ok(())
                }
                Some(FormCommand::Submit) => {
                    match interruptible(cancel.clone(), form.submit()).await {
                        Ok(SubmitOutcome::Saved { next, .. }) => {
                            form.teardown();
                            return Ok(Some(next));
                        }
                        Ok(SubmitOutcome::Invalid) => {
                            println!("{}", "⚠️ Please fix the highlighted fields".bright_yellow());
                            Ok(())
                        }
                        Ok(SubmitOutcome::Busy) => {
                            println!("{}", "⏳ Please wait...".dimmed());
                            Ok(())
                        }
                        Ok(SubmitOutcome::Failed(_)) => Ok(()),
                        Err(e) => Err(e),
                    }
                }
                Some(FormCommand::Cancel) => {
                    form.teardown();
                    return Ok(Some(form.cancel()));
                }
                Some(FormCommand::Dismiss(prefix)) => {
                    self.dismiss(&prefix);
                    Ok(())
                }
                Some(FormCommand::Quit) => {
                    form.teardown();
                    return Ok(None);
                }
                None => {
                    println!(
                        "{}",
                        "Commands: p <plate> | b <n> | m <n> | y <n> | s | c | x <toast> | q".dimmed()
                    );
                    Ok(())
                }
            };

            if let Err(ViewError::Cancelled) = result {
                return Ok(Some(Route::TruckList));
            }
        }
    }
}

fn render_list(view: &TruckList) {
    println!();
    println!("{}", "📋 TRUCKS".bright_green().bold());
    println!("{}", "=========".bright_green());

    if view.is_loading() {
        println!("{}", "⏳ Loading...".dimmed());
        return;
    }
    if let Some(error) = view.error() {
        println!("{} {}", "❌".bright_red(), error.message.bright_red());
        if let Some(details) = &error.details {
            println!("   {}", details.dimmed());
        }
        println!("{}", "   Type 'r' to retry".dimmed());
    }
    if view.trucks().is_empty() {
        println!("{}", "No trucks registered. Type 'n' to add one.".dimmed());
        return;
    }
    for truck in view.trucks() {
        println!(
            "{:>5}  {:<8} {:<20} {:<24} {:>4}  R$ {}",
            truck.id,
            truck.license_plate.bold(),
            truck.brand,
            truck.model,
            truck.manufacturing_year,
            truck.fipe_price
        );
    }
}

fn render_options(label: &str, entries: &[NamedCode], selected: &str, disabled: bool) {
    if disabled {
        println!("  {}: {}", label, "loading...".dimmed());
        return;
    }
    let current = entries
        .iter()
        .find(|entry| entry.code == selected)
        .map(|entry| entry.name.as_str())
        .unwrap_or("-");
    println!("  {}: {}", label, current.bold());
    for (index, entry) in entries.iter().enumerate() {
        println!("      {:>3}. {}", index + 1, entry.name);
    }
}

fn render_field_error(form: &TruckForm, field: FormField) {
    let message = form.field_error(field);
    if !message.is_empty() {
        println!("      {}", message.bright_red());
    }
}

fn render_form(form: &TruckForm) {
    println!();
    let title = if form.is_edit_mode() { "✏️ EDIT TRUCK" } else { "➕ NEW TRUCK" };
    println!("{}", title.bright_cyan().bold());
    println!("{}", "==============".bright_cyan());

    let disabled = form.is_loading_inputs();
    match (&form.values().license_plate, form.current_truck()) {
        (Some(plate), _) => {
            println!("  License plate: {}", plate.bold());
            render_field_error(form, FormField::LicensePlate);
        }
        (None, Some(truck)) => println!("  License plate: {}", truck.license_plate.dimmed()),
        (None, None) => println!("  License plate: {}", "loading...".dimmed()),
    }

    render_options("Brand", form.brands(), &form.values().brand, disabled);
    render_field_error(form, FormField::Brand);
    render_options("Model", form.models(), &form.values().model, disabled);
    render_field_error(form, FormField::Model);
    render_options("Year", form.years(), &form.values().manufacturing_year, disabled);
    render_field_error(form, FormField::ManufacturingYear);

    if form.is_submitting() {
        println!("{}", "⏳ Saving...".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_commands() {
        assert_eq!(ListCommand::parse("n"), Some(ListCommand::New));
        assert_eq!(ListCommand::parse("e 12"), Some(ListCommand::Edit(12)));
        assert_eq!(ListCommand::parse(" d 3 "), Some(ListCommand::Delete(3)));
        assert_eq!(ListCommand::parse("x 1a2b"), Some(ListCommand::Dismiss("1a2b".to_string())));
        assert_eq!(ListCommand::parse("e abc"), None);
        assert_eq!(ListCommand::parse(""), None);
    }

    #[test]
    fn test_parse_form_commands() {
        assert_eq!(FormCommand::parse("p ABC1D23"), Some(FormCommand::Plate("ABC1D23".to_string())));
        assert_eq!(FormCommand::parse("b 2"), Some(FormCommand::Brand(2)));
        assert_eq!(FormCommand::parse("m 0"), Some(FormCommand::Model(0)));
        assert_eq!(FormCommand::parse("s"), Some(FormCommand::Submit));
        assert_eq!(FormCommand::parse("y"), None);
    }

    #[test]
    fn test_code_at() {
        let entries = vec![NamedCode::new("59", "Volvo"), NamedCode::new("102", "Scania")];
        assert_eq!(code_at(&entries, 0), Some(String::new()));
        assert_eq!(code_at(&entries, 2), Some("102".to_string()));
        assert_eq!(code_at(&entries, 3), None);
    }
}
