//! Verify Example - Interactive OTP entry
//!
//! Type digits, paste a full code, Backspace through fields, move with the
//! arrow keys. Enter submits once every field is filled. Escape or Ctrl+C quits.
//!
//! Run with: cargo run --example verify -- --length 6 --placeholder ______
//!
//! Logs go to stderr: RUST_LOG=debug cargo run --example verify 2> otp.log

use std::cell::RefCell;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::info;

use spark_otp::state::input::{disable_bracketed_paste, enable_bracketed_paste, poll_event, route_event};
use spark_otp::{
    on_key, render_form, setup_global_keys, verification_form, write_line, FormHandle, FormProps,
    InputMode,
};

#[derive(Parser)]
#[command(author, version, about = "Enter a one-time passcode", long_about = None)]
struct Cli {
    /// Number of fields
    #[arg(short, long, default_value_t = 6)]
    length: usize,

    /// Placeholder, one character per field
    #[arg(short, long)]
    placeholder: Option<String>,

    /// Keyboard hint: number or tel
    #[arg(short, long, default_value = "number")]
    mode: InputMode,

    /// Do not focus the first field on start
    #[arg(long)]
    no_auto_focus: bool,
}

fn event_loop(form: &FormHandle, running: &AtomicBool) -> anyhow::Result<()> {
    let mut out = stdout();
    write_line(&mut out, &render_form(form))?;

    while running.load(Ordering::SeqCst) {
        if let Some(event) = poll_event(Duration::from_millis(16))? {
            route_event(event);
            write_line(&mut out, &render_form(form))?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let running = Arc::new(AtomicBool::new(true));
    let submitted: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

    let form = verification_form(FormProps {
        length: cli.length,
        input_mode: cli.mode,
        placeholder: cli.placeholder,
        auto_focus: !cli.no_auto_focus,
        on_submit: Some(Rc::new({
            let submitted = submitted.clone();
            let running = running.clone();
            move |code: &str| {
                *submitted.borrow_mut() = Some(code.to_string());
                running.store(false, Ordering::SeqCst);
            }
        })),
        ..FormProps::default()
    })
    .context("failed to mount the OTP form")?;
    info!("mounted {}-field form ({} keyboard)", cli.length, cli.mode.as_str());

    let keys = setup_global_keys(running.clone());
    let escape_cleanup = on_key("Escape", {
        let running = running.clone();
        move || {
            running.store(false, Ordering::SeqCst);
            true
        }
    });

    println!("Enter the code sent to you:");
    enable_raw_mode().context("failed to enable raw mode")?;
    enable_bracketed_paste()?;

    let result = event_loop(&form, &running);

    disable_bracketed_paste()?;
    disable_raw_mode()?;
    println!();

    escape_cleanup();
    keys.cleanup();
    form.unmount();
    result?;

    match submitted.borrow().as_deref() {
        Some(code) => println!("Code submitted: {code}"),
        None => println!("Cancelled."),
    }
    stdout().flush()?;
    Ok(())
}
