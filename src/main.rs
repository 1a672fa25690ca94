use anyhow::{Context, Result};
use chrono::Local;
use std::time::Instant;
use team_roster_to_sqlite::{
    cli::{database_path, Cli, Commands},
    import_roster,
    parser::resolve_types,
    source::open_source,
    types::TYPE_COUNT,
    writer::{list_batches, load_batch, SqliteWriter},
    ConsoleUi, MatchupProfile, SilentUi, TypeLabel,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Import { source, db, quiet } => {
            let start = Instant::now();
            let db_path = database_path(db)?;

            let roster = open_source(&source)?;
            let mut writer = SqliteWriter::open(&db_path)?;
            let now = Local::now().naive_local();

            let batch = if quiet {
                import_roster(roster.as_ref(), &mut writer, &mut SilentUi::new(), now)
            } else {
                import_roster(roster.as_ref(), &mut writer, &mut ConsoleUi::new(), now)
            }
            .with_context(|| format!("Failed to import roster {}", source))?;

            if quiet {
                println!("{}", batch.id);
            } else {
                println!(
                    "\nStored batch {} ({} members) in {:?} in {:.1}s",
                    batch.id,
                    batch.len(),
                    db_path,
                    start.elapsed().as_secs_f64()
                );
            }
        }

        Commands::Matchup { type1, type2, json } => {
            let (type1, type2) =
                resolve_types(Some(type1.to_lowercase()), type2.map(|t| t.to_lowercase()));
            let profile = MatchupProfile::calculate(&type1, type2.as_deref());

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                let label = match &type2 {
                    Some(t2) => format!("{}/{}", type1, t2),
                    None => type1.clone(),
                };
                println!("Matchups for {}:\n", label);
                println!("  {:<10} {:>9} {:>9}", "type", "offensive", "defensive");
                for label in TypeLabel::ALL {
                    println!(
                        "  {:<10} {:>9} {:>9}",
                        label,
                        profile.offensive[label],
                        profile.defensive[label]
                    );
                }
            }
        }

        Commands::Show { batch_id, db, json } => {
            let db_path = database_path(db)?;
            let writer = SqliteWriter::open(&db_path)?;
            let batch = load_batch(writer.connection(), &batch_id)?
                .with_context(|| format!("No batch {} in {:?}", batch_id, db_path))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            } else {
                println!(
                    "Batch {} from {} at {}\n",
                    batch.team_id,
                    batch.source.as_deref().unwrap_or("?"),
                    batch.created_at
                );
                for member in &batch.members {
                    let types = match &member.type2 {
                        Some(t2) => format!("{}/{}", member.type1, t2),
                        None => member.type1.clone(),
                    };
                    let s = &member.stats;
                    println!(
                        "  {:<14} {:<18} HP {:>5} Atk {:>5} Def {:>5} SpA {:>5} SpD {:>5} Spe {:>5}",
                        member.name.as_deref().unwrap_or("<unnamed>"),
                        types,
                        s.hp,
                        s.attack,
                        s.defense,
                        s.special_attack,
                        s.special_defense,
                        s.speed
                    );

                    let weak: Vec<_> = member
                        .matchups
                        .iter()
                        .filter(|m| m.defensive_score < 0)
                        .map(|m| m.type_name.as_str())
                        .collect();
                    if !weak.is_empty() {
                        println!("  {:<14} weak to: {}", "", weak.join(", "));
                    }
                }
            }
        }

        Commands::Batches { db } => {
            let db_path = database_path(db)?;
            let writer = SqliteWriter::open(&db_path)?;
            let batches = list_batches(writer.connection())?;

            if batches.is_empty() {
                println!("No batches in {:?}", db_path);
            }
            for batch in batches {
                println!(
                    "  {}  {}  {} members  ({})",
                    batch.team_id,
                    batch.created_at,
                    batch.members,
                    batch.source.as_deref().unwrap_or("?")
                );
            }
        }

        Commands::ListTypes => {
            println!("Available types ({}):\n", TYPE_COUNT);
            for label in TypeLabel::ALL {
                println!("  {}", label);
            }
        }
    }

    Ok(())
}
