use roster_core::{Group, Membership, Person, PersonPatch, Phone, Role, Roster, RosterError};

fn person(name: &str) -> Person {
    Person::parse(name, "98765432", "member@example.com", "311, Clementi Ave 2").unwrap()
}

/// Basketball (capacity 10, Captain) with Alice as captain at 4 sessions.
fn seeded_roster() -> Roster {
    let basketball = Group::parse("Basketball", 10, ["Captain"]).unwrap();
    let roster = Roster::new().add_group(basketball.clone()).unwrap();
    let alice = person("Alice")
        .join(basketball)
        .unwrap()
        .assign_role("Basketball", Role::parse("Captain").unwrap())
        .unwrap()
        .attend("Basketball", 4)
        .unwrap();
    roster
        .add_person(alice)
        .unwrap()
        .add_person(person("Bob"))
        .unwrap()
}

#[test]
fn set_person_replaces_in_place() {
    let roster = seeded_roster();
    let alice = roster.person("Alice").unwrap().clone();
    let patch = PersonPatch {
        phone: Some(Phone::parse("81234567").unwrap()),
        ..PersonPatch::default()
    };

    let next = roster.set_person(&alice, alice.apply(&patch).unwrap()).unwrap();

    assert_eq!(next.people()[0].phone().as_str(), "81234567");
    assert_eq!(next.people()[1].name().as_str(), "Bob");
    assert_eq!(
        next.people()[0]
            .membership("Basketball")
            .unwrap()
            .attendance()
            .count(),
        4
    );
    assert_eq!(roster.people()[0].phone().as_str(), "98765432");
}

#[test]
fn set_person_rejects_rename_onto_existing_person() {
    let roster = seeded_roster();
    let alice = roster.person("Alice").unwrap().clone();

    let err = roster.set_person(&alice, person("Bob")).unwrap_err();
    assert_eq!(err, RosterError::DuplicatePerson("Bob".to_string()));
}

#[test]
fn set_person_rejects_missing_target() {
    let roster = seeded_roster();
    let err = roster.set_person(&person("Carol"), person("Carol")).unwrap_err();
    assert_eq!(err, RosterError::PersonNotFound("Carol".to_string()));
}

#[test]
fn empty_patch_is_rejected() {
    let alice = person("Alice");
    assert!(matches!(
        alice.apply(&PersonPatch::default()),
        Err(RosterError::ValidationFailed(_))
    ));
}

#[test]
fn set_group_rebinds_members_and_keeps_role_and_count() {
    let roster = seeded_roster();
    let basketball = roster.group("Basketball").unwrap().clone();
    let renamed = Group::parse("Varsity Basketball", 20, ["Captain", "Coach"]).unwrap();

    let next = roster.set_group(&basketball, renamed.clone()).unwrap();

    assert!(next.group("Basketball").is_none());
    let alice = next.person("Alice").unwrap();
    assert!(!alice.has_membership("Basketball"));
    let membership = alice.membership("Varsity Basketball").unwrap();
    assert_eq!(membership.group(), &renamed);
    assert_eq!(membership.role().as_str(), "Captain");
    assert_eq!(membership.attendance().to_string(), "4/20");
}

#[test]
fn set_group_is_all_or_nothing_when_capacity_drops_below_count() {
    let roster = seeded_roster();
    let basketball = roster.group("Basketball").unwrap().clone();
    let shrunk = Group::parse("Basketball", 3, ["Captain"]).unwrap();

    let err = roster.set_group(&basketball, shrunk).unwrap_err();
    assert!(matches!(err, RosterError::AttendanceCapExceeded { .. }));
    assert_eq!(roster.group("Basketball").unwrap().capacity(), 10);
}

#[test]
fn set_group_rejects_dropping_a_held_role() {
    let roster = seeded_roster();
    let basketball = roster.group("Basketball").unwrap().clone();
    let no_roles = Group::parse("Basketball", 10, Vec::<&str>::new()).unwrap();

    assert!(matches!(
        roster.set_group(&basketball, no_roles),
        Err(RosterError::RoleNotFound { .. })
    ));
}

#[test]
fn set_group_rejects_rename_onto_existing_group() {
    let roster = seeded_roster()
        .add_group(Group::parse("Chess", 2, Vec::<&str>::new()).unwrap())
        .unwrap();
    let basketball = roster.group("Basketball").unwrap().clone();
    let clash = Group::parse("Chess", 10, ["Captain"]).unwrap();

    assert_eq!(
        roster.set_group(&basketball, clash).unwrap_err(),
        RosterError::DuplicateGroup("Chess".to_string())
    );
}

#[test]
fn stale_group_copy_in_membership_is_rejected() {
    let roster = seeded_roster();
    let stale = Group::parse("Basketball", 99, ["Captain"]).unwrap();
    let carol = person("Carol").join(stale).unwrap();

    assert_eq!(
        roster.add_person(carol).unwrap_err(),
        RosterError::GroupNotFound("Basketball".to_string())
    );
}

#[test]
fn membership_rebuilt_from_parts_checks_catalog_and_capacity() {
    let group = Group::parse("Choir", 2, ["Soloist"]).unwrap();

    assert!(Membership::new(group.clone(), Role::parse("Soloist").unwrap(), 2).is_ok());
    assert!(matches!(
        Membership::new(group.clone(), Role::parse("Conductor").unwrap(), 0),
        Err(RosterError::RoleNotFound { .. })
    ));
    assert!(matches!(
        Membership::new(group, Role::Default, 3),
        Err(RosterError::AttendanceCapExceeded { .. })
    ));
}

#[test]
fn members_of_lists_people_in_roster_order() {
    let roster = seeded_roster();
    let names: Vec<_> = roster
        .members_of("Basketball")
        .map(|person| person.name().to_string())
        .collect();
    assert_eq!(names, ["Alice"]);
}
