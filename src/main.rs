use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use escale::config::{self, SiteConfig};
use escale::page::{Page, PageContext};
use escale::site::{self, PageKind, SiteOptions};
use escale::store::{JsonFileStore, MemoryStore};
use escale::output;
use escale::types::FormKind;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "escale")]
#[command(version)]
#[command(about = "Headless interaction layer for a static tourism site")]
#[command(long_about = "\
Headless interaction layer for a static tourism site

Runs the site's client-side behavior without a browser: form validation,
the light/dark theme preference, the active nav link, the hamburger menu
and the hero slider.

Pages:

  home          header + hero slider (autoplay every 5s, pauses on hover)
  reservation   header + #reservation-form (name, email, phone, date, people, message)
  contact       header + #contact-form (name, email, message)

Set ESCALE_LOG (e.g. ESCALE_LOG=debug) to see controller logs on stderr.

Run 'escale gen-config' to generate a documented escale.toml.")]
struct Cli {
    /// Config file
    #[arg(long, default_value = "escale.toml", global = true)]
    config: PathBuf,

    /// Preference store file (holds the theme)
    #[arg(long, default_value = ".escale-prefs.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate form input exactly as the site does on submit
    Check {
        #[command(subcommand)]
        form: CheckForm,
    },
    /// Show the stored theme, or toggle and save it
    Theme {
        /// Flip the theme and persist the new value
        #[arg(long)]
        toggle: bool,
        /// Act as if the system prefers a dark color scheme
        #[arg(long)]
        prefers_dark: bool,
    },
    /// Run a page's interactions and print the resulting HTML
    Render(RenderArgs),
    /// Print a stock escale.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum CheckForm {
    /// Reservation form
    Reservation(ReservationArgs),
    /// Contact form
    Contact(ContactArgs),
}

#[derive(clap::Args)]
struct ReservationArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Arrival date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    people: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Date to validate against instead of the local date
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(clap::Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Page to render
    #[arg(value_enum)]
    page: PageKind,
    /// Location path (defaults to the page's own file, e.g. /index.html)
    #[arg(long)]
    path: Option<String>,
    /// Number of slides on the home page
    #[arg(long, default_value_t = 3)]
    slides: usize,
    /// Seconds of autoplay to simulate, at most one day
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(..=86_400))]
    elapsed_secs: u64,
    /// Clicks on the slider's next button
    #[arg(long, default_value_t = 0)]
    next: usize,
    /// Clicks on the slider's prev button
    #[arg(long, default_value_t = 0)]
    prev: usize,
    /// Click the hamburger toggle once
    #[arg(long)]
    open_menu: bool,
    /// Leave #theme-toggle out of the markup
    #[arg(long)]
    no_theme_toggle: bool,
    /// Act as if the system prefers a dark color scheme
    #[arg(long)]
    prefers_dark: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { form } => {
            let site_config = config::load_config(&cli.config)?;
            let valid = match form {
                CheckForm::Reservation(args) => check_reservation(&site_config, args),
                CheckForm::Contact(args) => check_contact(&site_config, args),
            };
            return Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            });
        }
        Command::Theme {
            toggle,
            prefers_dark,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let store = JsonFileStore::open(&cli.store)?;
            let mut page = Page::ready(
                site::build(PageKind::Home, &SiteOptions::default()),
                PageContext::local(&PageKind::Home.default_path(), prefers_dark),
                &site_config,
                Box::new(store),
            );
            if toggle && let Some(button) = page.theme_toggle() {
                page.click(button);
            }
            output::print_theme(page.theme(), toggle, &cli.store);
        }
        Command::Render(args) => {
            let site_config = config::load_config(&cli.config)?;
            let store = JsonFileStore::open(&cli.store)?;
            let page = render(&site_config, store, &args);
            output::print_page_summary(&page);
            println!("{}", page.document().to_html());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so they never mix with HTML on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("ESCALE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open `kind`'s page with a throwaway store; checks never touch preferences.
fn form_page(site_config: &SiteConfig, kind: PageKind, today: Option<NaiveDate>) -> Page {
    let mut context = PageContext::local(&kind.default_path(), false);
    if let Some(today) = today {
        context.today = today;
    }
    Page::ready(
        site::build(kind, &SiteOptions::default()),
        context,
        site_config,
        Box::new(MemoryStore::new()),
    )
}

/// Fill and submit a form, print the feedback, report whether it succeeded.
fn submit_form(mut page: Page, kind: FormKind, values: &[(&str, &str)]) -> bool {
    for (name, value) in values {
        page.set_field(kind, name, value);
    }
    let Some(form) = page.form(kind).map(|f| f.form()) else {
        return false;
    };
    page.submit(form);
    match page.feedback(kind) {
        Some(feedback) => {
            output::print_feedback(kind, feedback);
            feedback.is_success()
        }
        None => false,
    }
}

fn check_reservation(site_config: &SiteConfig, args: ReservationArgs) -> bool {
    let page = form_page(site_config, PageKind::Reservation, args.today);
    submit_form(
        page,
        FormKind::Reservation,
        &[
            ("name", args.name.as_str()),
            ("email", args.email.as_str()),
            ("phone", args.phone.as_str()),
            ("date", args.date.as_str()),
            ("people", args.people.as_str()),
            ("message", args.message.as_str()),
        ],
    )
}

fn check_contact(site_config: &SiteConfig, args: ContactArgs) -> bool {
    let page = form_page(site_config, PageKind::Contact, None);
    submit_form(
        page,
        FormKind::Contact,
        &[
            ("name", args.name.as_str()),
            ("email", args.email.as_str()),
            ("message", args.message.as_str()),
        ],
    )
}

fn render(site_config: &SiteConfig, store: JsonFileStore, args: &RenderArgs) -> Page {
    let options = SiteOptions {
        slides: args.slides,
        theme_toggle: !args.no_theme_toggle,
    };
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| args.page.default_path());
    let mut page = Page::ready(
        site::build(args.page, &options),
        PageContext::local(&path, args.prefers_dark),
        site_config,
        Box::new(store),
    );

    if args.open_menu
        && let Some(menu) = page.menu()
    {
        let toggle = menu.toggle_button();
        page.click(toggle);
    }
    let controls = page
        .slider()
        .map(|s| (s.next_button(), s.prev_button()));
    if let Some((next, prev)) = controls {
        for (button, clicks) in [(next, args.next), (prev, args.prev)] {
            if let Some(button) = button {
                for _ in 0..clicks {
                    page.click(button);
                }
            }
        }
    }
    page.advance(Duration::from_secs(args.elapsed_secs));
    page
}
