use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use common::utils::{ContactMode, Platform};
use enquiry_client::{
    config::ClientConfig,
    form::{
        Alert, ApiDispatcher, EnquiryDispatcher, EnquiryForm, FieldKey, FormSchema,
        IntentDispatcher, SubmitError, SubmitOutcome,
    },
    http::ApiClient,
    intent::{Intent, IntentOpener, SystemOpener},
    reviews,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONTACT_PHONE: &str = "+91 7428073088";
const CONTACT_EMAIL: &str = "support@zyvastra.com";
const WHATSAPP_GREETING: &str = "Hi! I have a query about your products.";

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a requirement to the enquiries API
    Submit(RequirementArgs),

    /// Prepare an SMS enquiry in the messaging app
    Sms(ContactArgs),

    /// Prepare an email enquiry in the mail client
    Email(ContactArgs),

    /// Open a WhatsApp chat
    Whatsapp {
        #[clap(long, default_value = CONTACT_PHONE)]
        phone: String,
        #[clap(long, default_value = WHATSAPP_GREETING)]
        text: String,
    },

    /// Start a phone call
    Call {
        #[clap(long, default_value = CONTACT_PHONE)]
        number: String,
    },

    #[clap(subcommand)]
    Reviews(ReviewCommands),
}

#[derive(Args)]
struct RequirementArgs {
    #[clap(long, default_value = "")]
    company: String,
    #[clap(long, default_value = "")]
    name: String,
    #[clap(long, default_value = "")]
    email: String,
    #[clap(long, default_value = "")]
    phone: String,
    #[clap(long, default_value = "")]
    quantity: String,
    #[clap(long, default_value = "")]
    product: String,
    #[clap(long, default_value = "")]
    notes: String,
    #[clap(long)]
    country_code: Option<String>,
}

#[derive(Args)]
struct ContactArgs {
    /// Recipient phone number or email address
    #[clap(long)]
    to: Option<String>,
    #[clap(long, default_value = "")]
    product: String,
    #[clap(long, default_value = "")]
    details: String,
    #[clap(long, default_value = "")]
    name: String,
    #[clap(long, default_value = "")]
    email: String,
    #[clap(long, default_value = "")]
    phone: String,
    #[clap(long, default_value = "+91")]
    country_code: String,
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// Show every review
    List,
    /// Show the average rating and review count
    Average,
    /// Show the dashboard summary
    Dashboard {
        #[clap(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    info!("Using {} profile, API base {}", config.profile, config.api_base_url);
    let api = ApiClient::new(config);

    match cli.command {
        Commands::Submit(args) => {
            let mut form = EnquiryForm::new(FormSchema::post_requirement());
            form.update_field(FieldKey::CompanyName, args.company);
            form.update_field(FieldKey::Name, args.name);
            form.update_field(FieldKey::Email, args.email);
            form.update_field(FieldKey::Phone, args.phone);
            form.update_field(FieldKey::Quantity, args.quantity);
            form.update_field(FieldKey::ProductService, args.product);
            form.update_field(FieldKey::OrderNotes, args.notes);
            if let Some(code) = args.country_code {
                form.set_country_code(code);
            }

            submit(&mut form, &ApiDispatcher::new(api)).await?;
        }
        Commands::Sms(args) => {
            let to = args.to.clone().unwrap_or_else(|| CONTACT_PHONE.to_string());
            let mut form = contact_form(ContactMode::Sms, args);
            submit(&mut form, &IntentDispatcher::new(SystemOpener, ContactMode::Sms, to)).await?;
        }
        Commands::Email(args) => {
            let to = args.to.clone().unwrap_or_else(|| CONTACT_EMAIL.to_string());
            let mut form = contact_form(ContactMode::Email, args);
            submit(&mut form, &IntentDispatcher::new(SystemOpener, ContactMode::Email, to)).await?;
        }
        Commands::Whatsapp { phone, text } => {
            open(Intent::WhatsApp { phone, text }).await?;
        }
        Commands::Call { number } => {
            open(Intent::Tel { number }).await?;
        }
        Commands::Reviews(ReviewCommands::List) => {
            for review in reviews::all_reviews(&api).await? {
                println!("{} ({}/5): {}", review.name, review.rating, review.text);
            }
        }
        Commands::Reviews(ReviewCommands::Average) => {
            let counts = reviews::average_counts(&api).await?;
            println!("Overall Rating: {} / 5 ({} reviews)", counts.average, counts.count);
        }
        Commands::Reviews(ReviewCommands::Dashboard { limit }) => {
            let dashboard = reviews::dashboard_reviews(&api, limit).await?;
            println!("Overall Rating: {} / 5 ({} reviews)", dashboard.average, dashboard.count);
            for review in dashboard.latest {
                println!("  {} ({}/5): {}", review.name, review.rating, review.text);
            }
        }
    }

    Ok(())
}

fn contact_form(mode: ContactMode, args: ContactArgs) -> EnquiryForm {
    let mut form = EnquiryForm::new(FormSchema::for_mode(mode)).with_country_code(args.country_code);
    form.update_field(FieldKey::ProductService, args.product);
    form.update_field(FieldKey::OrderNotes, args.details);
    form.update_field(FieldKey::Name, args.name);
    form.update_field(FieldKey::Email, args.email);
    form.update_field(FieldKey::Phone, args.phone);
    form
}

async fn submit<D: EnquiryDispatcher>(form: &mut EnquiryForm, dispatcher: &D) -> anyhow::Result<()> {
    let result = form.submit(dispatcher).await;
    let alert = report(form, result)?;
    println!("{}", alert);
    Ok(())
}

/// Turns a submit result into the alert to show, or an error listing what went wrong.
fn report(
    form: &EnquiryForm,
    result: Result<SubmitOutcome, SubmitError>,
) -> anyhow::Result<Alert> {
    match result {
        Ok(SubmitOutcome::Sent(receipt)) => Ok(receipt.alert()),
        Ok(SubmitOutcome::Invalid) => {
            let errors: Vec<String> = FieldKey::ALL
                .into_iter()
                .filter(|key| !form.field_error(*key).is_empty())
                .map(|key| format!("{}: {}", key.label(), form.field_error(key)))
                .collect();
            bail!("Please fix the form:\n{}", errors.join("\n"))
        }
        Err(e) => bail!("{}", e.alert()),
    }
}

async fn open(intent: Intent) -> anyhow::Result<()> {
    let opened = SystemOpener.open(&intent, Platform::current()).await?;
    info!("Opened {}", opened.url);
    Ok(())
}
