//! View projection and rendering.
//!
//! [`ViewState`] is what the gate projects its state into; rendering it is
//! the host's job, modeled by the [`Surface`] trait. [`TextSurface`] is the
//! terminal implementation used by the CLI.

use serde::Serialize;
use std::io::{self, Write};
use warden_core::AccessMode;
use warden_provider::registry;

/// Parameters for the record form. Only ever produced in the granted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSpec {
    pub record_id: String,
    pub object_api_name: Option<String>,
    pub mode: AccessMode,
}

impl FormSpec {
    /// Display label for the form's object: registry label if known,
    /// otherwise the raw API name.
    pub fn object_label(&self) -> &str {
        match self.object_api_name.as_deref() {
            Some(name) => registry::lookup(name).map(|l| l.label).unwrap_or(name),
            None => "Record",
        }
    }
}

/// What the host should currently display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    /// Neither form nor denial: the check is unresolved or has failed.
    Empty,
    Form(FormSpec),
    Denied { message: String },
}

/// Render a view as a formatted terminal panel.
pub fn render_text(view: &ViewState) -> String {
    let mut out = String::new();

    match view {
        ViewState::Empty => {
            out.push_str("(no record view -- access not yet determined)\n");
        }
        ViewState::Form(form) => {
            out.push_str("\n");
            out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
            out.push_str("║                         RECORD FORM                          ║\n");
            out.push_str("╠══════════════════════════════════════════════════════════════╣\n");
            out.push_str(&format!(
                "║  Object:             {:>38} ║\n",
                form.object_label()
            ));
            out.push_str(&format!("║  Record:             {:>38} ║\n", form.record_id));
            out.push_str(&format!(
                "║  Mode:               {:>38} ║\n",
                form.mode.as_str()
            ));
            out.push_str("╚══════════════════════════════════════════════════════════════╝\n");
        }
        ViewState::Denied { message } => {
            out.push_str("\n");
            out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
            out.push_str("║                        ACCESS DENIED                         ║\n");
            out.push_str("╠══════════════════════════════════════════════════════════════╣\n");
            out.push_str(&format!("║  {}\n", message));
            out.push_str("╚══════════════════════════════════════════════════════════════╝\n");
        }
    }

    out
}

/// Injected rendering capability. The gate never draws anything itself;
/// a surface turns the projected view into host output.
pub trait Surface {
    fn show_form(&mut self, form: &FormSpec) -> io::Result<()>;
    fn show_denial(&mut self, message: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// Push a view to a surface.
pub fn apply<S: Surface>(surface: &mut S, view: &ViewState) -> io::Result<()> {
    match view {
        ViewState::Empty => surface.clear(),
        ViewState::Form(form) => surface.show_form(form),
        ViewState::Denied { message } => surface.show_denial(message),
    }
}

/// Renders views as text panels to any writer.
pub struct TextSurface<W: Write> {
    writer: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn show_form(&mut self, form: &FormSpec) -> io::Result<()> {
        self.writer
            .write_all(render_text(&ViewState::Form(form.clone())).as_bytes())
    }

    fn show_denial(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(
            render_text(&ViewState::Denied {
                message: message.to_string(),
            })
            .as_bytes(),
        )
    }

    fn clear(&mut self) -> io::Result<()> {
        self.writer
            .write_all(render_text(&ViewState::Empty).as_bytes())
    }
}
