use roster_core::{
    GroupRecord, MembershipRecord, PersonRecord, Role, Roster, RosterError, RosterRecord,
};
use serde_json::json;

fn sample_json() -> serde_json::Value {
    json!({
        "groups": [
            { "name": "Basketball", "capacity": 10, "roles": ["Captain", "Treasurer"] },
            { "name": "Chess", "capacity": 4, "roles": [] }
        ],
        "people": [
            {
                "name": "Alice Pauline",
                "phone": "94351253",
                "email": "alice@example.com",
                "address": "123, Jurong West Ave 6, #08-111",
                "memberships": [
                    { "groupName": "Basketball", "role": "Captain", "attendanceCount": 3 },
                    { "groupName": "Chess", "role": "default", "attendanceCount": 0 }
                ]
            },
            {
                "name": "Benson Meier",
                "phone": "98765432",
                "email": "johnd@example.com",
                "address": "311, Clementi Ave 2, #02-25",
                "memberships": []
            }
        ]
    })
}

fn load(value: serde_json::Value) -> Result<Roster, RosterError> {
    let record: RosterRecord = serde_json::from_value(value).unwrap();
    record.into_roster()
}

#[test]
fn json_record_loads_into_roster() {
    let roster = load(sample_json()).unwrap();

    assert_eq!(roster.groups().len(), 2);
    assert_eq!(roster.people()[1].name().as_str(), "Benson Meier");

    let alice = roster.person("Alice Pauline").unwrap();
    let basketball = alice.membership("Basketball").unwrap();
    assert_eq!(basketball.role(), &Role::parse("Captain").unwrap());
    assert_eq!(basketball.attendance().count(), 3);
    assert_eq!(basketball.group(), roster.group("Basketball").unwrap());
    assert!(alice.membership("Chess").unwrap().is_default_role());
}

#[test]
fn exported_record_uses_camel_case_membership_keys() {
    let roster = load(sample_json()).unwrap();
    let exported = serde_json::to_value(RosterRecord::from_roster(&roster)).unwrap();

    assert_eq!(exported, sample_json());
}

#[test]
fn reloading_an_export_yields_an_equal_roster() {
    let roster = load(sample_json()).unwrap();
    let reloaded = RosterRecord::from_roster(&roster).into_roster().unwrap();
    assert_eq!(reloaded, roster);
}

#[test]
fn unknown_group_fails_whole_load() {
    let mut value = sample_json();
    value["people"][0]["memberships"][1]["groupName"] = json!("Tennis");

    assert_eq!(
        load(value).unwrap_err(),
        RosterError::GroupNotFound("Tennis".to_string())
    );
}

#[test]
fn attendance_over_capacity_fails_whole_load() {
    let mut value = sample_json();
    value["people"][0]["memberships"][0]["attendanceCount"] = json!(11);

    assert!(matches!(
        load(value).unwrap_err(),
        RosterError::AttendanceCapExceeded {
            current: 11,
            requested: 0,
            capacity: 10,
        }
    ));
}

#[test]
fn duplicate_names_fail_whole_load() {
    let mut value = sample_json();
    value["people"][1]["name"] = json!("Alice Pauline");
    assert_eq!(
        load(value).unwrap_err(),
        RosterError::DuplicatePerson("Alice Pauline".to_string())
    );

    let mut value = sample_json();
    value["groups"][1]["name"] = json!("Basketball");
    assert_eq!(
        load(value).unwrap_err(),
        RosterError::DuplicateGroup("Basketball".to_string())
    );
}

#[test]
fn malformed_field_fails_whole_load() {
    let mut value = sample_json();
    value["people"][1]["email"] = json!("not-an-email");

    assert!(matches!(
        load(value).unwrap_err(),
        RosterError::ValidationFailed(_)
    ));
}

#[test]
fn record_types_build_directly() {
    let record = RosterRecord {
        groups: vec![GroupRecord {
            name: "Choir".to_string(),
            capacity: 0,
            roles: Vec::new(),
        }],
        people: vec![PersonRecord {
            name: "Dana".to_string(),
            phone: "555".to_string(),
            email: "dana@example.org".to_string(),
            address: "1 Main St".to_string(),
            memberships: vec![MembershipRecord {
                group_name: "Choir".to_string(),
                role: "DEFAULT".to_string(),
                attendance_count: 0,
            }],
        }],
    };

    let roster = record.into_roster().unwrap();
    let membership = roster.people()[0].membership("Choir").unwrap();
    assert!(!membership.can_attend(1));
}
