use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use env_logger::Env;

use surveyor::app::Clients;
use surveyor::config::Config;
use surveyor::core::health::{HealthMonitor, HealthStatus};
use surveyor::core::models::generation::GenerationRequest;
use surveyor::core::models::results::SurveyResults;
use surveyor::core::models::health::Health;
use surveyor::core::models::survey::{Question, Survey, SurveyDraft};
use surveyor::core::ports::api::SurveyApi;
use surveyor::core::services::{auth, generation, survey};
use surveyor::core::taking::SurveyTaking;
use surveyor::error::Error;
use surveyor::impls::demo::{DemoStore, DemoSurveyGenerator};
use surveyor::request::Credentials;
use surveyor::server;

#[derive(Parser)]
#[command(name = "surveyor", version, about = "Create, share, take and analyse surveys")]
struct Cli {
    /// Serve everything from built-in sample data instead of the backend
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the survey backend and the generator once
    Health,
    /// Poll both backends on the configured interval
    WatchHealth {
        #[arg(long)]
        count: Option<usize>,
    },
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
    },
    Logout,
    Whoami,
    /// List the surveys you created
    Surveys,
    /// Create a survey from a JSON file holding a title and questions
    Create { file: PathBuf },
    /// Draft questions for a theme with the AI generator
    Generate {
        theme: String,
        #[arg(long, default_value_t = 3)]
        questions: usize,
        #[arg(long, default_value_t = 4)]
        answers: usize,
        /// Save the drafted survey right away
        #[arg(long)]
        save: bool,
    },
    Delete { id: String },
    Show { id: String },
    /// Answer a survey, one 1-based answer number per question
    Take {
        id: String,
        #[arg(long = "answer", num_args = 1..)]
        answers: Vec<usize>,
    },
    Results { id: String },
    /// Run the sample backend over HTTP
    Serve,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("surveyor=info,actix_web=info")).init();
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if cli.demo {
        config.demo_mode = true;
    }

    match run(cli.command, &config).await {
        Err(e) if e.is_auth() => Err(anyhow!("{}; run `surveyor login <username> <password>`", e)),
        other => Ok(other?),
    }
}

async fn run(command: Command, config: &Config) -> Result<(), Error> {
    if let Command::Serve = command {
        let store = Arc::new(DemoStore::seeded().with_latency(config.demo_latency));
        let (server, _) = server::run(config.serve_addr, store, DemoSurveyGenerator::new(config.demo_latency))?;
        return Ok(server.await?);
    }

    let clients = Clients::from_config(config);
    let api = clients.api.as_ref();
    let session = &clients.session;
    match command {
        Command::Health => {
            report_health("backend", clients.api.check_health().await);
            report_health("generator", clients.generator.check_health().await);
        }
        Command::WatchHealth { count } => watch_health(&clients, config, count).await,
        Command::Login { username, password } => {
            let current = auth::login(api, session, &Credentials::new(username, password)).await?;
            println!("logged in as {}", current.user.username);
        }
        Command::Register { username, password } => {
            let current = auth::register(api, session, &Credentials::new(username, password)).await?;
            println!("registered and logged in as {}", current.user.username);
        }
        Command::Logout => auth::logout(session)?,
        Command::Whoami => match session.load()? {
            Some(current) => println!("{} ({})", current.user.username, current.user.id),
            None => println!("not logged in"),
        },
        Command::Surveys => {
            let surveys = survey::my_surveys(api, session).await?;
            if surveys.is_empty() {
                println!("you have not created any surveys yet");
            }
            for s in surveys {
                println!("{}  {}  ({} questions)", s.id, s.title, s.questions.len());
            }
        }
        Command::Create { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let draft: SurveyDraft = serde_json::from_str(&raw)?;
            let created = survey::create_survey(api, session, draft).await?;
            println!("created {}: share this number with respondents", created.id);
        }
        Command::Generate {
            theme,
            questions,
            answers,
            save,
        } => {
            let mut draft = SurveyDraft::new("", Vec::new());
            let request = GenerationRequest::new(theme, questions, answers);
            generation::fill_draft(clients.generator.as_ref(), session, &mut draft, &request).await?;
            print_questions(&draft.title, &draft.questions);
            if save {
                let created = survey::create_survey(api, session, draft).await?;
                println!("saved as {}", created.id);
            }
        }
        Command::Delete { id } => {
            survey::delete_survey(api, session, survey::survey_number(&id)?).await?;
            println!("deleted {}", id.trim());
        }
        Command::Show { id } => {
            let found = survey::open_survey(api, &id).await?;
            print_survey(&found);
        }
        Command::Take { id, answers } => take(api, &id, &answers).await?,
        Command::Results { id } => print_results(&survey::results(api, &id).await?),
        Command::Serve => {}
    }
    Ok(())
}

fn report_health(name: &str, outcome: Result<Health, Error>) {
    match outcome {
        Ok(health) => println!("{}: {}", name, health.status),
        Err(e) => println!("{}: unreachable ({})", name, e),
    }
}

async fn watch_health(clients: &Clients, config: &Config, count: Option<usize>) {
    let backend = HealthMonitor::start(clients.api.clone(), config.health_interval);
    let generator = HealthMonitor::start(clients.generator.clone(), config.health_interval);
    let (mut backend_rx, mut generator_rx) = (backend.subscribe(), generator.subscribe());
    let mut seen = 0;
    while count.map_or(true, |n| seen < n) {
        let changed = tokio::select! {
            r = backend_rx.changed() => r.map(|_| "backend"),
            r = generator_rx.changed() => r.map(|_| "generator"),
        };
        let (name, status) = match changed {
            Ok(name @ "backend") => (name, *backend_rx.borrow_and_update()),
            Ok(name) => (name, *generator_rx.borrow_and_update()),
            Err(_) => break,
        };
        println!("{}: {}", name, label(status));
        seen += 1;
    }
}

fn label(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Checking => "checking",
        HealthStatus::Healthy => "healthy",
        HealthStatus::Unhealthy => "unhealthy",
    }
}

async fn take(api: &dyn SurveyApi, id: &str, answers: &[usize]) -> Result<(), Error> {
    let mut taking = SurveyTaking::new(survey::survey_number(id)?);
    let loaded = taking.load(api).await?.clone();
    print_survey(&loaded);
    for (question, &answer) in answers.iter().enumerate() {
        if answer == 0 {
            return Err(Error::validation("answer numbers start at 1"));
        }
        taking.select(question, answer - 1)?;
    }
    taking.submit(api).await?;
    println!("thank you, your answers to {} were recorded", loaded.id);
    Ok(())
}

fn print_questions(title: &str, questions: &[Question]) {
    println!("{}", title);
    for (i, q) in questions.iter().enumerate() {
        println!("  {}. {}", i + 1, q.question);
        for (j, a) in q.answers.iter().enumerate() {
            println!("     {}) {}", j + 1, a);
        }
    }
}

fn print_survey(s: &Survey) {
    print_questions(&format!("{}  {}", s.id, s.title), &s.questions);
}

fn print_results(results: &SurveyResults) {
    println!("{}: {} responses", results.survey_id, results.total_responses);
    for (i, q) in results.questions.iter().enumerate() {
        println!("  {}. {}", i + 1, q.question);
        let leading = q.leading().filter(|_| results.total_responses > 0).map(|a| a.text.as_str());
        for a in &q.answers {
            let mark = if Some(a.text.as_str()) == leading { "*" } else { " " };
            println!("   {} {:<30} {:>5} {:>6.1}%", mark, a.text, a.count, a.percentage);
        }
    }
}
