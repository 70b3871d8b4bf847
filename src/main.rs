use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rental_scout::afford::{affordability, Lifestyle, MAX_SALARY};
use rental_scout::bot::{Business, ChatContext, ChatEngine, QuickAction};
use rental_scout::draft::{DraftStore, FormView};
use rental_scout::extract::extract_with_area;
use rental_scout::leads::{JsonFileLeadStore, LeadStore, LeadSubmission, SubmittedLead};
use rental_scout::locality::suggest;
use rental_scout::models::{Area, DraftPatch};
use rental_scout::prefill::{build_share_link, parse_area, parse_prefill};
use rental_scout::settings::{load_settings, Settings};
use rental_scout::whatsapp::{chat_target, form_message, resume_message, share_message, wa_link};

#[derive(Parser)]
#[command(name = "rental-scout")]
#[command(about = "Rental lead capture for Malad, Kandivali and Borivali")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./rental-scout.toml when present)
    #[arg(long, env = "RENTAL_SCOUT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract preferences from a free-text message
    Extract {
        text: String,

        /// Area already chosen, scopes locality detection
        #[arg(long, value_parser = area_arg)]
        area: Option<Area>,
    },

    /// Ask the assistant
    Chat {
        text: String,

        /// Visitor phone for WhatsApp links
        #[arg(long)]
        phone: Option<String>,

        #[arg(long, value_parser = area_arg)]
        area: Option<Area>,
    },

    /// Show the draft a landing URL prefills
    Prefill { url: String },

    /// Build a share link for a draft
    Share {
        /// Free-text preferences to seed the draft
        #[arg(long)]
        text: Option<String>,

        /// Landing URL to seed the draft
        #[arg(long)]
        url: Option<String>,
    },

    /// List localities for an area
    Localities {
        #[arg(value_parser = area_arg)]
        area: Area,

        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Maximum comfortable rent for a monthly salary
    Afford {
        #[arg(value_parser = clap::value_parser!(u64).range(0..=MAX_SALARY))]
        salary: u64,

        #[arg(long)]
        lifestyle: Option<Lifestyle>,
    },

    /// Submitted leads
    Lead {
        #[command(subcommand)]
        action: LeadCommands,
    },
}

#[derive(Subcommand)]
enum LeadCommands {
    /// Validate a lead and keep it as the last submitted one
    Record {
        /// Id issued by the submission API
        #[arg(long)]
        lead_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        /// Free-text preferences
        #[arg(long)]
        text: Option<String>,
    },

    /// Show the last submitted lead
    Last,
}

fn area_arg(value: &str) -> Result<Area, String> {
    parse_area(value).ok_or_else(|| {
        format!(
            "unknown area {value:?}, expected one of: {}",
            Area::ALL.map(|a| a.as_str()).join(", ")
        )
    })
}

fn business(settings: &Settings) -> Business {
    Business {
        whatsapp: settings.business_whatsapp.clone(),
        ..Business::default()
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("Failed to load settings")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = DraftStore::shared();

    match cli.command {
        Commands::Extract { text, area } => {
            let extraction = extract_with_area(&text, area);
            if extraction.summary.is_empty() {
                println!("Nothing recognized");
            }
            for line in &extraction.summary {
                println!("• {line}");
            }
            if extraction.is_meaningful() {
                print_json(&extraction.patch)?;
            }
        }

        Commands::Chat { text, phone, area } => {
            let engine = ChatEngine::new(business(&settings));
            let ctx = ChatContext {
                phone10: phone,
                draft_area: area,
            };
            let reply = engine.reply(&text, &ctx);

            println!("{}", reply.text);
            println!();
            for action in &reply.quick_actions {
                match action {
                    QuickAction::Whatsapp { label, .. } => {
                        let href = engine.whatsapp_href(action, &ctx).unwrap_or_default();
                        println!("[{label}] {href}");
                    }
                    QuickAction::ApplyDraft { label, draft, .. } => {
                        println!("[{label}]");
                        print_json(draft)?;
                    }
                    other => println!("[{}]", other.label()),
                }
            }
        }

        Commands::Prefill { url } => {
            let prefill = parse_prefill(&url).context("Failed to read landing URL")?;
            let mut form = FormView::new(store.clone());
            store.apply_external(prefill.patch);
            let outcome = form.sync();

            info!(
                "🔗 Prefilled draft (open form: {}, scroll: {})",
                prefill.auto_open, outcome.prefilled || prefill.auto_scroll
            );
            print_json(form.values())?;
        }

        Commands::Share { text, url } => {
            let mut form = FormView::new(store.clone());
            if let Some(url) = url {
                let prefill = parse_prefill(&url).context("Failed to read landing URL")?;
                store.apply_external(prefill.patch);
                form.sync();
            }
            if let Some(text) = text {
                let extraction = extract_with_area(&text, form.values().area);
                if !extraction.is_meaningful() {
                    warn!("No preferences recognized in {:?}", text);
                }
                store.apply_external(extraction.patch);
                form.sync();
            }

            let link = build_share_link(&settings.site_base_url, &settings.form_path, form.values())
                .context("Failed to build share link")?;
            println!("{link}");
            println!(
                "{}",
                wa_link(
                    &settings.business_whatsapp,
                    &share_message(form.values(), &link)
                )
            );
        }

        Commands::Localities { area, query } => {
            for locality in suggest(area, &query) {
                println!("{locality}");
            }
        }

        Commands::Afford { salary, lifestyle } => {
            let lifestyle = lifestyle.unwrap_or(settings.default_lifestyle);
            let analysis = affordability(salary, lifestyle);
            info!("💰 {} lifestyle on ₹{}/mo", lifestyle, salary);
            print_json(&analysis)?;
        }

        Commands::Lead { action } => {
            let leads = JsonFileLeadStore::new(settings.leads_dir.clone());
            match action {
                LeadCommands::Record {
                    lead_id,
                    name,
                    phone,
                    text,
                } => {
                    let mut form = FormView::new(store.clone());
                    if let Some(text) = text {
                        store.apply_external(extract_with_area(&text, None).patch);
                        form.sync();
                    }
                    form.input(DraftPatch {
                        name: Some(name),
                        phone: Some(phone),
                        ..Default::default()
                    });

                    let submission = LeadSubmission::from_draft(form.values(), None)
                        .context("Lead is not ready to submit")?;
                    let lead = SubmittedLead::new(lead_id, &submission);
                    leads.save(&lead).await?;
                    info!(
                        "✅ Recorded {:?} lead {} in {} store",
                        submission.score(),
                        lead.lead_id,
                        leads.store_name()
                    );

                    println!(
                        "{}",
                        wa_link(
                            &chat_target(None, &settings.business_whatsapp),
                            &form_message(form.values())
                        )
                    );
                    store.clear_draft();
                }
                LeadCommands::Last => match leads.load_last().await? {
                    Some(lead) => {
                        print_json(&lead)?;
                        println!(
                            "{}",
                            wa_link(&settings.business_whatsapp, &resume_message(&lead))
                        );
                    }
                    None => println!("No lead recorded in {}", leads.dir().display()),
                },
            }
        }
    }

    Ok(())
}
