use clap::Args;
use wallboard_app::{
    database,
    domain::users::{
        SqliteUsersService, UsersService,
        data::NewUser,
        records::{Role, TeamId},
        validation::role_from_username,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Username, e.g. AD001
    #[arg(long)]
    username: String,

    /// Display name
    #[arg(long)]
    full_name: String,

    /// Agent, Supervisor or Admin; taken from the username prefix when omitted
    #[arg(long)]
    role: Option<Role>,

    /// Team for agents and supervisors
    #[arg(long)]
    team_id: Option<i64>,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://wallboard.db")]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqliteUsersService::new(pool);
    let role = args.role.or_else(|| role_from_username(&args.username));

    let user = service
        .create_user(NewUser {
            username: args.username,
            full_name: args.full_name,
            role,
            team_id: args.team_id.map(TeamId::new),
            status: None,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("role: {}", user.role);

    if let Some(team_name) = user.team_name {
        println!("team: {team_name}");
    }

    Ok(())
}
