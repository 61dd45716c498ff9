use coverdesk_core::db::open_db_in_memory;
use coverdesk_core::{
    ActionError, CreateTemplateInput, RequestContext, SqliteTemplateRepository, TemplateActions,
    UpdateTemplateInput, ValidationError,
};
use uuid::Uuid;

fn create_input(name: &str) -> CreateTemplateInput {
    CreateTemplateInput {
        id: None,
        name: name.to_string(),
        description: None,
        tone: None,
        language: None,
        body: "Dear {company},".to_string(),
        is_system: None,
    }
}

#[test]
fn create_user_template_is_owned_by_caller() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let template = actions.create_template(&ctx, create_input("formal")).unwrap().template;

    assert!(!template.uuid.is_nil());
    assert_eq!(template.user_id.as_deref(), Some("user-a"));
    assert!(!template.is_system);
    assert!(template.created_at > 0);
}

#[test]
fn create_system_template_has_no_owner() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("admin");

    let input = CreateTemplateInput {
        is_system: Some(true),
        ..create_input("default")
    };
    let template = actions.create_template(&ctx, input).unwrap().template;

    assert_eq!(template.user_id, None);
    assert!(template.is_system);
}

#[test]
fn create_with_explicit_id_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let input = CreateTemplateInput {
        id: Some(id),
        ..create_input("imported")
    };

    let template = actions.create_template(&ctx, input).unwrap().template;
    assert_eq!(template.uuid, id);
}

#[test]
fn create_rejects_empty_name_and_body() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let input = CreateTemplateInput {
        name: String::new(),
        ..create_input("ignored")
    };
    let err = actions.create_template(&ctx, input).unwrap_err();
    assert!(matches!(
        err,
        ActionError::InvalidInput(ValidationError::EmptyName)
    ));

    let input = CreateTemplateInput {
        body: String::new(),
        ..create_input("no body")
    };
    let err = actions.create_template(&ctx, input).unwrap_err();
    assert!(matches!(
        err,
        ActionError::InvalidInput(ValidationError::EmptyBody)
    ));
    assert_eq!(err.to_string(), "Template body is required");
}

#[test]
fn anonymous_caller_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::anonymous();

    assert!(matches!(
        actions.create_template(&ctx, create_input("nope")).unwrap_err(),
        ActionError::Unauthorized
    ));
    assert!(matches!(
        actions.list_templates(&ctx).unwrap_err(),
        ActionError::Unauthorized
    ));
}

#[test]
fn list_returns_system_templates_union_own_templates() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let alice = RequestContext::authenticated("alice");
    let bob = RequestContext::authenticated("bob");

    let system = actions
        .create_template(
            &alice,
            CreateTemplateInput {
                is_system: Some(true),
                ..create_input("shipped default")
            },
        )
        .unwrap()
        .template;
    let alices = actions.create_template(&alice, create_input("alice's")).unwrap().template;
    let bobs = actions.create_template(&bob, create_input("bob's")).unwrap().template;

    let visible_to_alice = actions.list_templates(&alice).unwrap().templates;
    let alice_ids: Vec<_> = visible_to_alice.iter().map(|t| t.uuid).collect();
    assert_eq!(visible_to_alice.len(), 2);
    assert!(alice_ids.contains(&system.uuid));
    assert!(alice_ids.contains(&alices.uuid));
    assert!(!alice_ids.contains(&bobs.uuid));

    let visible_to_bob = actions.list_templates(&bob).unwrap().templates;
    let bob_ids: Vec<_> = visible_to_bob.iter().map(|t| t.uuid).collect();
    assert_eq!(visible_to_bob.len(), 2);
    assert!(bob_ids.contains(&system.uuid));
    assert!(bob_ids.contains(&bobs.uuid));
}

#[test]
fn update_merges_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let created = actions.create_template(&ctx, create_input("draft")).unwrap().template;

    let patch = UpdateTemplateInput {
        id: created.uuid,
        description: Some("a short pitch".to_string()),
        ..UpdateTemplateInput::default()
    };
    let updated = actions.update_template(&ctx, patch).unwrap().template;

    assert_eq!(updated.description.as_deref(), Some("a short pitch"));
    assert_eq!(updated.name, "draft");
    assert_eq!(updated.body, created.body);
    assert_eq!(updated.user_id, created.user_id);
}

#[test]
fn empty_update_returns_existing_template() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let created = actions.create_template(&ctx, create_input("stable")).unwrap().template;

    let patch = UpdateTemplateInput {
        id: created.uuid,
        ..UpdateTemplateInput::default()
    };
    let unchanged = actions.update_template(&ctx, patch).unwrap().template;
    assert_eq!(unchanged, created);
}

#[test]
fn update_foreign_template_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let owner = RequestContext::authenticated("user-a");
    let stranger = RequestContext::authenticated("user-b");

    let created = actions.create_template(&owner, create_input("private")).unwrap().template;

    let patch = UpdateTemplateInput {
        id: created.uuid,
        name: Some("hijacked".to_string()),
        ..UpdateTemplateInput::default()
    };
    let err = actions.update_template(&stranger, patch).unwrap_err();
    assert!(matches!(err, ActionError::NotFound { .. }));
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err.to_string(), "Template not found or not accessible.");
}

#[test]
fn update_missing_template_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let ctx = RequestContext::authenticated("user-a");

    let patch = UpdateTemplateInput {
        id: Uuid::new_v4(),
        name: Some("ghost".to_string()),
        ..UpdateTemplateInput::default()
    };
    let err = actions.update_template(&ctx, patch).unwrap_err();
    assert!(matches!(err, ActionError::NotFound { .. }));
}

#[test]
fn system_template_is_mutable_by_any_authenticated_caller() {
    // Matches the shipped behavior: an unowned template passes the
    // accessibility check for every signed-in user.
    let conn = open_db_in_memory().unwrap();
    let actions = TemplateActions::new(SqliteTemplateRepository::try_new(&conn).unwrap());
    let admin = RequestContext::authenticated("admin");
    let user = RequestContext::authenticated("user-b");

    let system = actions
        .create_template(
            &admin,
            CreateTemplateInput {
                is_system: Some(true),
                ..create_input("shared")
            },
        )
        .unwrap()
        .template;

    let patch = UpdateTemplateInput {
        id: system.uuid,
        body: Some("To whom it may concern,".to_string()),
        ..UpdateTemplateInput::default()
    };
    let updated = actions.update_template(&user, patch).unwrap().template;

    assert_eq!(updated.body, "To whom it may concern,");
    assert_eq!(updated.user_id, None);
}
