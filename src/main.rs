use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use recruitment_dashboard::{
    config::{get_config, init_config},
    dto::candidate_dto::{CandidateFields, CandidatePatch},
    models::candidate::{Candidate, CandidateStatus},
    services::{
        candidate_service::CandidateApi,
        export_service::ExportFormat,
        gateway::StaticCredential,
        list_controller::FetchState,
        mutation_service::DeleteTarget,
        query_state::ListQuery,
    },
    AppState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Recruitment dashboard client.
#[derive(Parser)]
#[command(name = "recruitment-dashboard", version, about = "Manage candidates through the recruitment API")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidates, optionally filtered
    List {
        /// Match against name, e-mail or role
        #[arg(long, default_value = "")]
        search: String,
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<CandidateStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one candidate
    Show { id: String },
    /// Create a candidate from a JSON file of fields
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Update a candidate from a JSON file of fields
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Change only the status of a candidate
    SetStatus { id: String, status: CandidateStatus },
    /// Delete a candidate after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show dashboard statistics
    Stats,
    /// Download a report
    Export {
        /// excel or pdf
        format: ExportFormat,
        /// Output directory, defaults to EXPORT_DIR
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    init_config()?;
    let config = get_config()?;
    info!("Using API at {}", config.api_base_url);

    let credentials = Arc::new(StaticCredential::new(config.api_token.clone()));
    let state = AppState::new(config, credentials)?;

    match cli.command {
        Commands::List {
            search,
            status,
            page,
        } => {
            let mut query = ListQuery::default();
            query.set_search_text(search);
            query.set_status_filter(status);
            query.set_page(page);

            let view = state.candidates_view();
            view.list.refetch_with(query).await;

            match view.list.snapshot().state {
                FetchState::Success(result) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&result.items)?);
                    } else {
                        for candidate in &result.items {
                            print_candidate_line(candidate);
                        }
                        println!(
                            "{} candidate(s) found, page {} of {}",
                            result.total_count, result.page, result.total_pages
                        );
                    }
                }
                FetchState::Failure(message) => anyhow::bail!(message),
                FetchState::Idle | FetchState::Loading => {}
            }
        }
        Commands::Show { id } => {
            let candidate = state.candidate_service.get_candidate(&id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&candidate)?);
            } else {
                print_candidate_details(&candidate);
            }
        }
        Commands::Create { file } => {
            let fields = read_fields(&file).await?;
            let mut view = state.candidates_view();
            view.mutations.open_create();
            let candidate = view.mutations.submit(fields).await?;
            println!("Created candidate {} ({})", candidate.name, candidate.id);
        }
        Commands::Update { id, file } => {
            let fields = read_fields(&file).await?;
            let existing = state.candidate_service.get_candidate(&id).await?;
            let mut view = state.candidates_view();
            view.mutations.open_edit(existing);
            let candidate = view.mutations.submit(fields).await?;
            println!("Updated candidate {} ({})", candidate.name, candidate.id);
        }
        Commands::SetStatus { id, status } => {
            let mut view = state.candidates_view();
            let candidate = view
                .mutations
                .update_candidate(&id, CandidatePatch::status_only(status))
                .await?;
            println!("{} is now {}", candidate.name, candidate.status);
        }
        Commands::Delete { id, yes } => {
            let candidate = state.candidate_service.get_candidate(&id).await?;
            let mut view = state.candidates_view();
            view.mutations.request_delete(DeleteTarget::from(&candidate));

            if yes || confirm(&format!("Delete {}? This cannot be undone. [y/N] ", candidate.name)).await? {
                view.mutations.confirm_delete().await?;
                println!("Deleted candidate {}", candidate.name);
            } else {
                view.mutations.cancel_delete();
                println!("Deletion cancelled");
            }
        }
        Commands::Stats => {
            let stats = state.dashboard_service.stats().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total:         {}", stats.total);
                println!("Pending:       {}", stats.pending);
                println!("Approved:      {}", stats.approved);
                println!("Rejected:      {}", stats.rejected);
                println!("Approval rate: {:.1}%", stats.approval_rate);
                println!("Recent:        {}", stats.recent_count);
                for role in &stats.top_roles {
                    println!("  {:<30} {}", role.role, role.count);
                }
            }
        }
        Commands::Export { format, out } => {
            let file = state.export_service.download(format).await?;
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            let path = file.save_to(&dir).await?;
            println!("Saved {} report to {}", format, path.display());
        }
    }

    Ok(())
}

async fn read_fields(path: &Path) -> anyhow::Result<CandidateFields> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let fields = serde_json::from_str(&raw)
        .with_context(|| format!("{} does not contain candidate fields", path.display()))?;
    Ok(fields)
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{}", prompt);
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_candidate_line(candidate: &Candidate) {
    println!(
        "{:<24} {:<28} {:<32} {:<10} {}y",
        candidate.id, candidate.name, candidate.role, candidate.status, candidate.experience_years
    );
}

fn print_candidate_details(candidate: &Candidate) {
    println!("{} <{}>", candidate.name, candidate.email);
    println!("  id:         {}", candidate.id);
    println!("  role:       {}", candidate.role);
    println!("  status:     {}", candidate.status);
    println!("  experience: {} year(s)", candidate.experience_years);
    if let Some(phone) = &candidate.phone {
        println!("  phone:      {}", phone);
    }
    if !candidate.skills.is_empty() {
        println!("  skills:     {}", candidate.skills.join(", "));
    }
    if let Some(link) = &candidate.linkedin {
        println!("  profile:    {}", link);
    }
    if let Some(notes) = &candidate.notes {
        println!("  notes:      {}", notes);
    }
    println!("  created:    {}", candidate.created_at.to_rfc3339());
    println!("  updated:    {}", candidate.updated_at.to_rfc3339());
}
