use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use code_field::app::{App, AppConfig};
use code_field::input::InputKind;
use code_field::logging;

/// Poll interval while a scroll animation runs
const FRAME: Duration = Duration::from_millis(16);
const IDLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Text,
    Numeric,
    Alphanumeric,
    Password,
}

impl From<Kind> for InputKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Text => InputKind::Text,
            Kind::Numeric => InputKind::Numeric,
            Kind::Alphanumeric => InputKind::Alphanumeric,
            Kind::Password => InputKind::Password,
        }
    }
}

/// Segmented OTP/PIN input in the terminal
#[derive(Debug, Parser)]
#[command(name = "code-field", version, about)]
struct Cli {
    /// Config file (JSON); defaults to the user config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of cells
    #[arg(short = 'n', long)]
    length: Option<usize>,

    /// Character shown instead of each typed character
    #[arg(short, long)]
    mask: Option<char>,

    /// Character shown in empty cells
    #[arg(short, long)]
    placeholder: Option<char>,

    #[arg(short, long, value_enum)]
    kind: Option<Kind>,

    /// Text the field starts with
    #[arg(short, long)]
    initial: Option<String>,

    /// Render the field without accepting input
    #[arg(long)]
    disabled: bool,

    /// Verify completed codes against this TOTP secret or otpauth:// URI
    #[arg(long, env = "CODE_FIELD_TOTP_SECRET")]
    totp_secret: Option<String>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        let field = &mut config.field;
        if let Some(length) = self.length {
            field.max_length = length;
        }
        if self.mask.is_some() {
            field.char_masker = self.mask;
        }
        if let Some(placeholder) = self.placeholder {
            field.char_empty_placeholder = placeholder;
        }
        if let Some(kind) = self.kind {
            field.input_kind = kind.into();
        }
        if let Some(initial) = self.initial {
            field.initial_text = initial;
        }
        if self.disabled {
            field.enabled = false;
        }
        if self.totp_secret.is_some() {
            config.totp_secret = self.totp_secret;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    cli.apply(&mut config);

    let _guard = logging::init(&config.log_file)?;
    tracing::info!(
        max_length = config.field.max_length,
        kind = config.field.input_kind.label(),
        totp = config.totp_secret.is_some(),
        "starting code-field"
    );

    let app = App::new(config)?;
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = if app.is_animating() { FRAME } else { IDLE };
        if event::poll(timeout)? {
            app.handle_event(event::read()?);
        }
        app.tick(Instant::now());
    }
    tracing::info!("exiting");
    Ok(())
}
