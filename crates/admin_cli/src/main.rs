use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use engine::{Engine, Fuel, MemberBalance, SpaceOverview};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "fuelshare_admin")]
#[command(about = "Admin utilities for Fuelshare (bootstrap spaces/members/cars)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fuelshare.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Space(Space),
    Member(Member),
    Car(Car),
    /// Print the balances of a space.
    Balances(BalancesArgs),
}

#[derive(Args, Debug)]
struct Space {
    #[command(subcommand)]
    command: SpaceCommand,
}

#[derive(Subcommand, Debug)]
enum SpaceCommand {
    Create(SpaceCreateArgs),
}

#[derive(Args, Debug)]
struct SpaceCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Member {
    #[command(subcommand)]
    command: MemberCommand,
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    Add(MemberAddArgs),
    /// Set or clear the guest flag of a member.
    Guest(MemberGuestArgs),
}

#[derive(Args, Debug)]
struct MemberAddArgs {
    #[arg(long)]
    space: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long)]
    guest: bool,
}

#[derive(Args, Debug)]
struct MemberGuestArgs {
    #[arg(long)]
    space: Uuid,
    #[arg(long)]
    member: Uuid,
    #[arg(long, action = clap::ArgAction::Set)]
    guest: bool,
}

#[derive(Args, Debug)]
struct Car {
    #[command(subcommand)]
    command: CarCommand,
}

#[derive(Subcommand, Debug)]
enum CarCommand {
    Add(CarAddArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FuelArg {
    Petrol,
    Diesel,
}

impl From<FuelArg> for Fuel {
    fn from(value: FuelArg) -> Self {
        match value {
            FuelArg::Petrol => Fuel::Petrol,
            FuelArg::Diesel => Fuel::Diesel,
        }
    }
}

#[derive(Args, Debug)]
struct CarAddArgs {
    #[arg(long)]
    space: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long, value_enum)]
    fuel: FuelArg,
    /// Liters per 100 distance units.
    #[arg(long)]
    consumption: f64,
}

#[derive(Args, Debug)]
struct BalancesArgs {
    #[arg(long)]
    space: Uuid,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn member_label(balance: &MemberBalance) -> String {
    if balance.is_guest {
        format!("{} (Guest)", balance.name)
    } else {
        balance.name.clone()
    }
}

fn print_balances(overview: &SpaceOverview) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stdout();
    let balances = &overview.balances;

    execute!(out, Print(format!("{}\n", overview.space.name)))?;
    for balance in &balances.members {
        execute!(
            out,
            Print(format!("  {:<24} {:>10.2}", member_label(balance), balance.balance))
        )?;
        if let Some(deviation) = balance.deviation {
            let color = if deviation < 0.0 {
                Color::Red
            } else {
                Color::Green
            };
            execute!(
                out,
                SetForegroundColor(color),
                Print(format!(" {deviation:>+10.2}")),
                ResetColor
            )?;
        }
        execute!(out, Print("\n"))?;
    }

    match balances.average {
        Some(average) => execute!(out, Print(format!("  {:<24} {average:>10.2}\n", "average")))?,
        None => execute!(out, Print("  no regular members\n"))?,
    }
    for (member_id, amount) in &balances.unattributed {
        execute!(
            out,
            Print(format!("  unattributed {member_id} {amount:>10.2}\n"))
        )?;
    }
    for car in &overview.space.cars {
        execute!(
            out,
            Print(format!(
                "  car {} ({}, {} l/100)\n",
                car.name,
                car.fuel.as_str(),
                car.consumption
            ))
        )?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Space(Space {
            command: SpaceCommand::Create(args),
        }) => {
            let space_id = engine.new_space(&args.name).await?;
            println!("created space: {} ({space_id})", args.name);
        }
        Command::Member(Member {
            command: MemberCommand::Add(args),
        }) => {
            let member_id = engine.new_member(args.space, &args.name, args.guest).await?;
            println!("added member: {} ({member_id})", args.name);
        }
        Command::Member(Member {
            command: MemberCommand::Guest(args),
        }) => {
            engine
                .set_member_guest(args.space, args.member, args.guest)
                .await?;
            println!("member {} guest: {}", args.member, args.guest);
        }
        Command::Car(Car {
            command: CarCommand::Add(args),
        }) => {
            let car_id = engine
                .new_car(args.space, &args.name, args.fuel.into(), args.consumption)
                .await?;
            println!("added car: {} ({car_id})", args.name);
        }
        Command::Balances(args) => {
            let overview = engine.space_balances(args.space).await?;
            print_balances(&overview)?;
        }
    }

    Ok(())
}
