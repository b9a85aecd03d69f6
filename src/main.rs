mod cli;

use chrono::{Local, Utc};
use clap::Parser;
use rubric_kit::error::{AppError, Result};
use rubric_kit::rubric::format::format_points;
use rubric_kit::rubric::{RubricDocument, WriteOptions};
use rubric_kit::types::config::Settings;
use rubric_kit::types::project::{GradeComponent, Project, TeamProject};
use rubric_kit::types::report::RubricSummary;
use rubric_kit::{config, logging, report, scan};
use std::fs;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const UNGRADED: i32 = 1;
    pub const INVALID: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let settings = config::load_settings(&std::env::current_dir()?)?;

    match cli.command {
        cli::Commands::Create(cmd) => create(&cmd, &settings),
        cli::Commands::Check(cmd) => check(&cmd, &settings),
        cli::Commands::Show(cmd) => {
            let project = Project::load(&cmd.project)?;
            let document = RubricDocument::from_file(&cmd.path, &project)?;
            let format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let summary = RubricSummary::from_document(&document);
            println!("{}", report::render(&summary, format)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Format(cmd) => {
            let project = Project::load(&cmd.project)?;
            let document = RubricDocument::from_file(&cmd.path, &project)?;
            let mut options = WriteOptions::from_settings(&settings.rubric);
            options.include_blank_comments |= cmd.blank_comments;

            let current = fs::read_to_string(&cmd.path)?;
            if current == document.serialize_with(&options) {
                println!("unchanged: {}", cmd.path.display());
            } else {
                document.save(&cmd.path, &options)?;
                println!("formatted: {}", cmd.path.display());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Project(cli::ProjectCommands::Show(cmd)) => {
            let project = Project::load(&cmd.project)?;
            print_project(&project, cmd.utc);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Project(cli::ProjectCommands::AddComponent(cmd)) => {
            let mut project = Project::load(&cmd.project)?;
            project.add_grade_component(GradeComponent::new(cmd.name.clone(), cmd.points))?;
            project.save(&cmd.project)?;
            println!(
                "added grade component '{}' ({} points) to {}",
                cmd.name,
                format_points(cmd.points),
                project.id
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

fn create(cmd: &cli::CreateCommand, settings: &Settings) -> Result<i32> {
    let project = Project::load(&cmd.project)?;
    let team_project = cmd
        .grades
        .as_deref()
        .map(TeamProject::load)
        .transpose()?;

    let mut document = RubricDocument::from_project(&project, team_project.as_ref())?;
    for raw in &cmd.penalties {
        let (description, points) = parse_penalty_arg(raw)?;
        document.add_penalty(description, points)?;
    }
    document.set_comments(cmd.comment.clone());

    let mut options = WriteOptions::from_settings(&settings.rubric);
    options.include_blank_comments |= cmd.blank_comments;

    match &cmd.output {
        Some(path) => {
            document.save(path, &options)?;
            println!("rubric written: {}", path.display());
        }
        None => print!("{}", document.serialize_with(&options)),
    }
    Ok(exit_code::SUCCESS)
}

fn check(cmd: &cli::CheckCommand, settings: &Settings) -> Result<i32> {
    let project = Project::load(&cmd.project)?;
    let files = scan::discover_rubrics(&cmd.path, &settings.rubric.extension)?;
    if files.is_empty() {
        println!("check: no rubric files found in {}", cmd.path.display());
        return Ok(exit_code::SUCCESS);
    }

    let mut invalid = 0;
    let mut ungraded = 0;
    for file in &files {
        match RubricDocument::from_file(file, &project) {
            Ok(document) => {
                let total = format!(
                    "{} / {}",
                    format_points(document.total_points()),
                    format_points(document.total_points_possible())
                );
                if document.is_fully_graded() {
                    println!("ok: {} ({total})", file.display());
                } else {
                    let missing = document.ungraded_components();
                    ungraded += 1;
                    tracing::warn!(
                        path = %file.display(),
                        missing = missing.len(),
                        "rubric has ungraded components"
                    );
                    println!(
                        "ungraded: {} ({total}; missing {})",
                        file.display(),
                        missing.join(", ")
                    );
                }
            }
            Err(AppError::InvalidRubric { path, source }) => {
                invalid += 1;
                println!("invalid: {path}: {source}");
            }
            Err(e) => return Err(e),
        }
    }

    println!(
        "checked {} rubric(s): {} invalid, {} ungraded",
        files.len(),
        invalid,
        ungraded
    );
    if invalid > 0 {
        Ok(exit_code::INVALID)
    } else if ungraded > 0 {
        Ok(exit_code::UNGRADED)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn parse_penalty_arg(raw: &str) -> Result<(String, f64)> {
    let (description, points) = raw.rsplit_once('=').ok_or_else(|| {
        AppError::InvalidArgument(format!("penalty must be DESCRIPTION=POINTS: {raw}"))
    })?;
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "penalty description cannot be empty: {raw}"
        )));
    }
    let points = points.trim().parse::<f64>().map_err(|_| {
        AppError::InvalidArgument(format!("penalty points are not a number: {raw}"))
    })?;
    Ok((description.to_string(), points))
}

fn print_project(project: &Project, utc: bool) {
    println!("{} ({})", project.name, project.id);
    println!();
    for component in &project.grade_components {
        println!("  {}: {}", component.name, format_points(component.points));
    }
    println!("  Total: {}", format_points(project.total_points()));

    let Some(deadline) = project.deadline else {
        return;
    };
    let now = Utc::now();
    println!();
    println!(
        " Deadline (Local): {}",
        deadline.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %:z")
    );
    if utc {
        println!("   Deadline (UTC): {}", deadline.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(status) = project.deadline_status(now) {
        println!("{status}");
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = match e {
                AppError::InvalidRubric { .. } | AppError::Rubric(_) => exit_code::INVALID,
                _ => exit_code::RUNTIME_FAILURE,
            };
            std::process::exit(code);
        }
    }
}
