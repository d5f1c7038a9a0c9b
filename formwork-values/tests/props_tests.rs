use formwork_schema::{
    App, Entity, EntityConfig, Property, PropertyType, Relation, RelationKind, SelectOption,
};
use formwork_values::{
    build_props_for_property, DataRecord, FieldValue, FormOverrides, InputProps, PropertyOverride,
    PropertyProps, Resolvers, ValueError,
};
use serde_json::json;
use std::collections::HashMap;

fn entity(id: &str, name: &str, properties: Vec<Property>) -> Entity {
    Entity {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        properties,
        identity_property: None,
        config: EntityConfig::default(),
    }
}

fn app_with(entities: Vec<Entity>) -> App {
    App {
        id: "demo".to_string(),
        name: "Demo".to_string(),
        description: None,
        entities: entities.into_iter().map(|e| (e.id.clone(), e)).collect(),
    }
}

fn contacts_with(property: Property) -> (App, Entity) {
    let contacts = entity("contacts", "Contact", vec![property]);
    let companies = entity("companies", "Company", vec![]);
    let app = app_with(vec![contacts.clone(), companies]);
    (app, contacts)
}

fn build(
    app: &App,
    entity: &Entity,
    property: &Property,
    record: Option<&DataRecord>,
) -> PropertyProps {
    build_props_for_property(entity, property, record, app, None).unwrap()
}

// ── common props ─────────────────────────────────────────────────

#[test]
fn common_props_carry_schema_metadata() {
    let mut property = Property::new("name", "Name", PropertyType::Text);
    property.config.required = true;
    property.config.help_text = Some("Full name".into());
    let (app, contacts) = contacts_with(property.clone());

    let props = build(&app, &contacts, &property, None);
    assert_eq!(props.common.name, "name");
    assert_eq!(props.common.label, "Name");
    assert_eq!(props.common.placeholder, "Type Contact Name");
    assert!(props.common.required);
    assert_eq!(props.common.help_text.as_deref(), Some("Full name"));
    assert!(!props.common.disabled);
}

#[test]
fn overrides_can_disable_a_property() {
    let property = Property::new("name", "Name", PropertyType::Text);
    let (app, contacts) = contacts_with(property.clone());
    let overrides = FormOverrides {
        properties: HashMap::from([("name".to_string(), PropertyOverride { disabled: true })]),
    };

    let props =
        build_props_for_property(&contacts, &property, None, &app, Some(&overrides)).unwrap();
    assert!(props.common.disabled);
}

// ── type-specific props ──────────────────────────────────────────

#[test]
fn text_props_carry_textarea_and_default() {
    let mut property = Property::new("bio", "Bio", PropertyType::Text);
    property.config.use_textarea = true;
    property.config.default_value = Some("n/a".into());
    let (app, contacts) = contacts_with(property.clone());

    let props = build(&app, &contacts, &property, None);
    assert_eq!(
        props.input,
        InputProps::Text {
            use_textarea: true,
            default_value: Some("n/a".into())
        }
    );
}

#[test]
fn single_select_resolves_defaults_against_options() {
    let mut property = Property::new("status", "Status", PropertyType::SingleSelect);
    property.config.options = vec![
        SelectOption { id: "open".into(), name: "Open".into() },
        SelectOption { id: "done".into(), name: "Done".into() },
    ];
    let (app, contacts) = contacts_with(property.clone());
    // "gone" is not a known option and must drop out
    let record = DataRecord::new("1").with_field("status", FieldValue::from(json!(["open", "gone"])));

    let props = build(&app, &contacts, &property, Some(&record));
    match props.input {
        InputProps::SingleSelect { options, default_selected } => {
            assert_eq!(options.len(), 2);
            assert_eq!(default_selected, vec!["open".to_string()]);
        }
        other => panic!("expected single select props, got {other:?}"),
    }
}

#[test]
fn scalar_select_value_resolves_too() {
    let mut property = Property::new("status", "Status", PropertyType::SingleSelect);
    property.config.options = vec![SelectOption { id: "open".into(), name: "Open".into() }];
    let (app, contacts) = contacts_with(property.clone());
    let record = DataRecord::new("1").with_field("status", "open");

    let props = build(&app, &contacts, &property, Some(&record));
    match props.input {
        InputProps::SingleSelect { default_selected, .. } => {
            assert_eq!(default_selected, vec!["open".to_string()]);
        }
        other => panic!("expected single select props, got {other:?}"),
    }
}

#[test]
fn radio_and_checkbox_carry_options() {
    let mut property = Property::new("kind", "Kind", PropertyType::Radio);
    property.config.options = vec![SelectOption { id: "a".into(), name: "A".into() }];
    let (app, contacts) = contacts_with(property.clone());

    let props = build(&app, &contacts, &property, None);
    assert_eq!(
        props.input,
        InputProps::Radio {
            options: property.config.options.clone()
        }
    );
}

#[test]
fn files_props_prefix_by_entity() {
    let property = Property::new("docs", "Documents", PropertyType::Files);
    let (app, contacts) = contacts_with(property.clone());

    let props = build(&app, &contacts, &property, None);
    assert_eq!(
        props.input,
        InputProps::Files {
            file_path_prefix: "entity/contacts".into()
        }
    );
}

// ── relation props ───────────────────────────────────────────────

fn relation_property(id: &str, target: &str, kind: RelationKind) -> Property {
    let mut p = Property::new(id, "Company", PropertyType::Relation);
    p.config.relation = Some(Relation { entity: target.to_string(), kind });
    p
}

#[test]
fn relation_resolves_target_entity_from_app() {
    let property = relation_property("company_id", "companies", RelationKind::HasOne);
    let (app, contacts) = contacts_with(property.clone());
    let record =
        DataRecord::new("1").with_field("company", FieldValue::from(json!({"id": 7})));

    let props = build(&app, &contacts, &property, Some(&record));
    match props.input {
        InputProps::Relation { target, relation, default_selected } => {
            assert_eq!(target.id, "companies");
            assert_eq!(relation.kind, RelationKind::HasOne);
            assert_eq!(default_selected, vec!["7".to_string()]);
        }
        other => panic!("expected relation props, got {other:?}"),
    }
}

#[test]
fn has_many_relation_collects_related_ids() {
    let property = relation_property("deals", "companies", RelationKind::HasMany);
    let (app, contacts) = contacts_with(property.clone());
    let record = DataRecord::new("1")
        .with_field("deals", FieldValue::from(json!([{"id": 1}, {"id": 2}])));

    let props = build(&app, &contacts, &property, Some(&record));
    match props.input {
        InputProps::Relation { default_selected, .. } => {
            assert_eq!(default_selected, vec!["1".to_string(), "2".to_string()]);
        }
        other => panic!("expected relation props, got {other:?}"),
    }
}

#[test]
fn relation_to_unknown_entity_fails() {
    let property = relation_property("ghost_id", "ghosts", RelationKind::HasOne);
    let (app, contacts) = contacts_with(property.clone());

    let err = build_props_for_property(&contacts, &property, None, &app, None).unwrap_err();
    assert!(matches!(err, ValueError::UnknownRelationTarget(ref e) if e == "ghosts"));
}

// ── unsupported types ────────────────────────────────────────────

#[test]
fn auto_increment_fails_naming_the_type() {
    let property = Property::new("seq", "Seq", PropertyType::AutoIncrement);
    let (app, contacts) = contacts_with(property.clone());

    let err = build_props_for_property(&contacts, &property, None, &app, None).unwrap_err();
    assert!(err.to_string().contains("auto_increment"));
}

// ── Resolvers boundary ───────────────────────────────────────────

struct TextResolvers;

impl Resolvers for TextResolvers {
    type View = String;

    fn spinner(&self) -> String {
        "<spinner/>".to_string()
    }

    fn card(&self, title: &str, body: Vec<String>) -> String {
        format!("<card title={title}>{}</card>", body.join(""))
    }

    fn button(&self, label: &str) -> String {
        format!("<button>{label}</button>")
    }

    fn input(&self, props: &PropertyProps) -> String {
        format!("<input name={}/>", props.common.name)
    }
}

#[test]
fn resolvers_render_props_without_ui_assumptions() {
    let property = Property::new("name", "Name", PropertyType::Text);
    let (app, contacts) = contacts_with(property.clone());
    let props = build(&app, &contacts, &property, None);

    let resolvers = TextResolvers;
    let form = resolvers.card(
        "Contact",
        vec![resolvers.input(&props), resolvers.button("Save")],
    );
    assert_eq!(
        form,
        "<card title=Contact><input name=name/><button>Save</button></card>"
    );
}
