//! Line renderer.
//!
//! Reads what each component shows out of the parallel arrays and writes it
//! as one styled terminal line:
//!
//! ```text
//! [1][2][3][4][5][6]  < Verify >
//! ```
//!
//! Empty fields show their placeholder dimmed; the focused component is
//! drawn in reverse video. A disabled submit button is dimmed.

use std::io::Write;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::engine::arrays::{core, text as text_arrays};
use crate::error::OtpError;
use crate::primitives::{FormHandle, OtpInputHandle};
use crate::state::focus;
use crate::types::{Attr, ComponentType};

/// What one component looks like in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub index: usize,
    pub component_type: ComponentType,
    /// Text content, or the placeholder when the content is empty
    pub text: String,
    pub is_placeholder: bool,
    pub focused: bool,
    pub attrs: Attr,
}

// =============================================================================
// Frame Capture
// =============================================================================

/// Capture the current look of one component.
pub fn render_component(index: usize) -> RenderedField {
    let content = text_arrays::get_text_content(index);
    let (text, is_placeholder) = if content.is_empty() {
        (text_arrays::get_placeholder(index), true)
    } else {
        (content, false)
    };

    RenderedField {
        index,
        component_type: core::get_component_type(index),
        text,
        is_placeholder,
        focused: focus::is_focused(index),
        attrs: text_arrays::get_text_attrs(index),
    }
}

/// Capture every field of an OTP input, in position order.
pub fn render_group(otp: &OtpInputHandle) -> Vec<RenderedField> {
    otp.fields().into_iter().map(render_component).collect()
}

/// Capture the fields of a form followed by its submit button.
pub fn render_form(form: &FormHandle) -> Vec<RenderedField> {
    let mut frame = render_group(form.otp());
    let mut button = render_component(form.submit_button());
    if !form.can_submit() {
        button.attrs |= Attr::DIM;
    }
    frame.push(button);
    frame
}

// =============================================================================
// Output
// =============================================================================

/// Plain-text form of a frame (no styling).
pub fn format_line(frame: &[RenderedField]) -> String {
    let mut line = String::new();
    for cell in frame {
        match cell.component_type {
            ComponentType::Button => {
                line.push_str("  < ");
                line.push_str(&cell.text);
                line.push_str(" >");
            }
            _ => {
                line.push('[');
                line.push_str(if cell.text.is_empty() { " " } else { &cell.text });
                line.push(']');
            }
        }
    }
    line
}

fn queue_attrs<W: Write>(out: &mut W, attrs: Attr) -> std::io::Result<()> {
    const MAPPING: [(Attr, Attribute); 8] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];

    for (flag, attribute) in MAPPING {
        if attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// Write a frame over the current terminal line.
pub fn write_line<W: Write>(out: &mut W, frame: &[RenderedField]) -> Result<(), OtpError> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

    for cell in frame {
        let mut attrs = cell.attrs;
        if cell.is_placeholder {
            attrs |= Attr::DIM;
        }
        if cell.focused {
            attrs |= Attr::INVERSE;
        }

        let (open, close) = match cell.component_type {
            ComponentType::Button => ("  < ", " >"),
            _ => ("[", "]"),
        };
        let body = if cell.text.is_empty() { " " } else { cell.text.as_str() };

        queue!(out, Print(open))?;
        queue_attrs(out, attrs)?;
        queue!(out, Print(body), SetAttribute(Attribute::Reset), Print(close))?;
    }

    out.flush()?;
    Ok(())
}
