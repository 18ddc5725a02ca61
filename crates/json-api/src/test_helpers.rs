//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use wallboard_app::{
    auth::{MockAuthService, TokenClaims},
    context::AppContext,
    domain::{
        agents::{
            MockAgentsService,
            records::{AgentRecord, AgentStatus, AgentUuid, Department},
        },
        users::{
            MockUsersService,
            records::{Role, TeamId, UserId, UserRecord, UserStatus},
        },
    },
};

use crate::{extensions::*, state::State};

/// The user every authenticated test request acts as.
pub(crate) const TEST_USER_ID: UserId = UserId::new(1);

pub(crate) fn test_claims(role: Role) -> TokenClaims {
    let username = match role {
        Role::Agent => "AG001",
        Role::Supervisor => "SP001",
        Role::Admin => "AD001",
    };

    TokenClaims {
        user_id: TEST_USER_ID,
        username: username.to_string(),
        role,
        iat: 0,
        exp: i64::MAX,
    }
}

#[salvo::handler]
pub(crate) async fn inject_claims(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(test_claims(Role::Admin));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_agent(uuid: AgentUuid) -> AgentRecord {
    let now = Timestamp::now();

    AgentRecord {
        uuid,
        agent_code: "A001".to_string(),
        name: "Alice Agent".to_string(),
        email: "alice@example.com".to_string(),
        department: Department::Support,
        skills: vec!["billing".to_string()],
        status: AgentStatus::Available,
        status_reason: None,
        status_changed_at: now,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_user(id: UserId) -> UserRecord {
    let now = Timestamp::now();

    UserRecord {
        id,
        username: "AG001".to_string(),
        full_name: "Alice Agent".to_string(),
        role: Role::Agent,
        team_id: Some(TeamId::new(1)),
        team_name: Some("Team Alpha".to_string()),
        status: UserStatus::Active,
        created_at: now,
        updated_at: now,
        last_login_at: None,
        deleted_at: None,
    }
}

fn strict_agents_mock() -> MockAgentsService {
    let mut agents = MockAgentsService::new();

    agents.expect_list_agents().never();
    agents.expect_get_agent().never();
    agents.expect_create_agent().never();
    agents.expect_update_agent().never();
    agents.expect_update_status().never();
    agents.expect_delete_agent().never();
    agents.expect_status_summary().never();

    agents
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_list_users().never();
    users.expect_get_user().never();
    users.expect_create_user().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();

    users
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login_without_password().never();
    auth.expect_verify_token().never();

    auth
}

fn state_with(
    agents: MockAgentsService,
    users: MockUsersService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        agents: Arc::new(agents),
        users: Arc::new(users),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_agents(agents: MockAgentsService) -> Arc<State> {
    state_with(agents, strict_users_mock(), strict_auth_mock())
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    state_with(strict_agents_mock(), users, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_agents_mock(), strict_users_mock(), auth)
}

pub(crate) fn agents_service(agents: MockAgentsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_agents(agents)))
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_users(users)))
            .hoop(inject_claims)
            .push(route),
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .push(route),
    )
}
