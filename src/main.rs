use std::env;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};

use fixture_desk::auth_store::AuthStore;
use fixture_desk::competition_store::CompetitionStore;
use fixture_desk::config::{FilterLexicon, GatewayConfig};
use fixture_desk::fixture_store::{DateBound, FixtureStore, Grade};
use fixture_desk::gateway::FixtureGateway;
use fixture_desk::model::{FixtureField, FixturePatch, NewFixture};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let config = GatewayConfig::from_env()?;
    let gateway = FixtureGateway::new(&config);
    let lexicon = FilterLexicon::from_env();

    match command.as_str() {
        "fixtures" => cmd_fixtures(gateway, lexicon, &args[1..]),
        "competitions" => cmd_competitions(gateway, &lexicon, &args[1..]),
        "set" => cmd_set(gateway, lexicon, &args[1..]),
        "score" => cmd_score(gateway, lexicon, &args[1..]),
        "create" => cmd_create(gateway, lexicon, &args[1..]),
        "edit" => cmd_edit(gateway, lexicon, &args[1..]),
        "sync" => cmd_sync(gateway, &lexicon, &args[1..]),
        "refresh" => cmd_refresh(gateway, &lexicon, &args[1..]),
        "add-competition" => cmd_add_competition(gateway, &lexicon, &args[1..]),
        "senior-grade" => cmd_senior_grade(gateway, &lexicon, &args[1..]),
        "login" => cmd_login(gateway, &args[1..]),
        "register" => cmd_register(gateway, &args[1..]),
        _ => {
            print_usage();
            bail!("unknown command: {command}");
        }
    }
}

fn cmd_fixtures(gateway: FixtureGateway, lexicon: FilterLexicon, args: &[String]) -> Result<()> {
    let mut store = FixtureStore::new(gateway, lexicon);
    store.load()?;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--competition" => {
                let name = iter.next().context("--competition needs a value")?;
                store.set_competition_filter(name);
            }
            "--from" => {
                let date = parse_date(iter.next().context("--from needs a value")?)?;
                store.set_date_bound(DateBound::From, Some(date));
            }
            "--to" => {
                let date = parse_date(iter.next().context("--to needs a value")?)?;
                store.set_date_bound(DateBound::To, Some(date));
            }
            "--hide-senior" => store.toggle_grade(Grade::Senior),
            "--hide-underage" => store.toggle_grade(Grade::Underage),
            other => bail!("unknown flag: {other}"),
        }
    }

    for fixture in store.current_fixtures() {
        let competition = fixture
            .competition
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        println!(
            "{:>5}  {}  {} v {}  [{}]  {} {}-{}",
            fixture.id,
            format_kickoff(fixture.date),
            fixture.home_team,
            fixture.away_team,
            competition,
            fixture.venue,
            fixture.home_score,
            fixture.away_score,
        );
    }
    println!(
        "{} of {} fixtures shown",
        store.current_fixtures().len(),
        store.fixtures().len()
    );
    Ok(())
}

fn cmd_competitions(
    gateway: FixtureGateway,
    lexicon: &FilterLexicon,
    args: &[String],
) -> Result<()> {
    let mut store = CompetitionStore::new(gateway, lexicon);
    store.load()?;
    let editable_only = args.iter().any(|a| a == "--editable");
    let list = if editable_only {
        store.editable_competitions()
    } else {
        store.competitions()
    };
    for competition in list {
        let grade = if competition.senior_grade {
            "senior"
        } else {
            "underage"
        };
        println!(
            "{}  {} ({})  {}",
            competition.id, competition.name, competition.year, grade
        );
    }
    Ok(())
}

fn cmd_set(gateway: FixtureGateway, lexicon: FilterLexicon, args: &[String]) -> Result<()> {
    let [id, field, value] = args else {
        bail!("usage: set <fixture-id> <field> <value>");
    };
    let id: i64 = id.parse().context("fixture id must be an integer")?;
    let field =
        FixtureField::parse(field).with_context(|| format!("unknown field: {field}"))?;
    let mut store = FixtureStore::new(gateway, lexicon);
    store.load()?;
    store.update_field(id, field, value)?;
    println!("updated fixture {id}");
    Ok(())
}

fn cmd_score(gateway: FixtureGateway, lexicon: FilterLexicon, args: &[String]) -> Result<()> {
    let [id, home, away] = args else {
        bail!("usage: score <fixture-id> <home> <away>");
    };
    let id: i64 = id.parse().context("fixture id must be an integer")?;
    let mut store = FixtureStore::new(gateway, lexicon);
    store.load()?;
    store.set_score(id, home, away)?;
    println!("recorded {home}-{away} for fixture {id}");
    Ok(())
}

fn cmd_create(gateway: FixtureGateway, lexicon: FilterLexicon, args: &[String]) -> Result<()> {
    let [home, away, venue, date, competition_id] = args else {
        bail!("usage: create <home> <away> <venue> <YYYY-MM-DD> <competition-id>");
    };
    let kickoff_ms = parse_date(date)?
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    let new_fixture = NewFixture {
        home_team: home.clone(),
        away_team: away.clone(),
        venue: venue.clone(),
        kickoff_ms,
        competition_id: competition_id
            .parse()
            .context("competition id must be an integer")?,
    };
    let mut store = FixtureStore::new(gateway, lexicon);
    store.create(&new_fixture)?;
    println!(
        "created; collection now holds {} fixtures",
        store.fixtures().len()
    );
    Ok(())
}

fn cmd_edit(gateway: FixtureGateway, lexicon: FilterLexicon, args: &[String]) -> Result<()> {
    let Some((id, pairs)) = args.split_first() else {
        bail!("usage: edit <fixture-id> <field=value>...");
    };
    let id: i64 = id.parse().context("fixture id must be an integer")?;
    let mut patch = FixturePatch {
        id,
        ..FixturePatch::default()
    };
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected field=value, got: {pair}");
        };
        apply_edit_pair(&mut patch, key, value)?;
    }
    let mut store = FixtureStore::new(gateway, lexicon);
    store.load()?;
    let updated = store.save_edits(&patch)?;
    println!("updated fields: {}", updated.join(", "));
    Ok(())
}

fn apply_edit_pair(patch: &mut FixturePatch, key: &str, value: &str) -> Result<()> {
    match key {
        "pitch" => patch.pitch = Some(value.to_string()),
        "venue" => patch.venue = Some(value.to_string()),
        "comment" => patch.comment = Some(value.to_string()),
        "referee_name" => patch.referee_name = Some(value.to_string()),
        "homeScore" => patch.home_score = Some(value.to_string()),
        "awayScore" => patch.away_score = Some(value.to_string()),
        "permission_sought" => patch.permission_sought = Some(parse_bool(value)?),
        "permission_obtained" => patch.permission_obtained = Some(parse_bool(value)?),
        other => bail!("unknown editable field: {other}"),
    }
    Ok(())
}

fn cmd_sync(gateway: FixtureGateway, lexicon: &FilterLexicon, args: &[String]) -> Result<()> {
    let [competition_id] = args else {
        bail!("usage: sync <competition-id>");
    };
    let mut store = CompetitionStore::new(gateway, lexicon);
    store.trigger_fixture_sync(competition_id)?;
    println!("sync triggered for competition {competition_id}");
    Ok(())
}

fn cmd_refresh(gateway: FixtureGateway, lexicon: &FilterLexicon, args: &[String]) -> Result<()> {
    let [competition_id] = args else {
        bail!("usage: refresh <competition-id>");
    };
    let store = CompetitionStore::new(gateway, lexicon);
    let count = store.refresh_fixture_count(competition_id)?;
    println!("competition {competition_id} now has {count} fixtures");
    Ok(())
}

fn cmd_add_competition(
    gateway: FixtureGateway,
    lexicon: &FilterLexicon,
    args: &[String],
) -> Result<()> {
    let [name] = args else {
        bail!("usage: add-competition <name>");
    };
    let mut store = CompetitionStore::new(gateway, lexicon);
    store.add_by_name(name)?;
    println!("{} competitions", store.competitions().len());
    Ok(())
}

fn cmd_senior_grade(
    gateway: FixtureGateway,
    lexicon: &FilterLexicon,
    args: &[String],
) -> Result<()> {
    let [competition_id, value] = args else {
        bail!("usage: senior-grade <competition-id> <true|false>");
    };
    let mut store = CompetitionStore::new(gateway, lexicon);
    store.set_senior_grade(competition_id, parse_bool(value)?)?;
    println!("competition {competition_id} updated");
    Ok(())
}

fn cmd_login(gateway: FixtureGateway, args: &[String]) -> Result<()> {
    let [email, password] = args else {
        bail!("usage: login <email> <password>");
    };
    let mut store = AuthStore::new(gateway);
    if store.login(email, password)? {
        println!("authenticated");
    } else {
        println!("login rejected");
    }
    Ok(())
}

fn cmd_register(gateway: FixtureGateway, args: &[String]) -> Result<()> {
    let [name, email, password] = args else {
        bail!("usage: register <name> <email> <password>");
    };
    let store = AuthStore::new(gateway);
    let user = store.register(name, email, password)?;
    println!("registered {} <{}>", user.name, user.email);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got: {raw}"))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => bail!("expected true or false, got: {other}"),
    }
}

fn format_kickoff(date_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(date_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| date_ms.to_string())
}

fn print_usage() {
    println!("fixture_desk <command>");
    println!();
    println!("  fixtures [--competition NAME] [--from YYYY-MM-DD] [--to YYYY-MM-DD]");
    println!("           [--hide-senior] [--hide-underage]");
    println!("  competitions [--editable]");
    println!("  set <fixture-id> <field> <value>");
    println!("  score <fixture-id> <home> <away>");
    println!("  create <home> <away> <venue> <YYYY-MM-DD> <competition-id>");
    println!("  edit <fixture-id> <field=value>...");
    println!("  sync <competition-id>");
    println!("  refresh <competition-id>");
    println!("  add-competition <name>");
    println!("  senior-grade <competition-id> <true|false>");
    println!("  login <email> <password>");
    println!("  register <name> <email> <password>");
}
