use addressbook_core::{
    Address, AddressBook, AddressBookChanged, Contact, ContactFilter, Email, ModelManager, Name,
    Phone, SortMode, StoreError, Tag,
};
use std::cell::RefCell;
use std::rc::Rc;

fn contact(name: &str, tags: &[&str]) -> Contact {
    Contact::new(
        Name::new(name).unwrap(),
        Phone::new("87652533").unwrap(),
        Email::new("person@example.com").unwrap(),
        Address::new("Clementi Ave 2").unwrap(),
    )
    .with_tags(tags.iter().map(|tag| Tag::new(tag).unwrap()))
}

fn model_with(contacts: Vec<Contact>) -> ModelManager {
    ModelManager::new(AddressBook::from_contacts(contacts).unwrap())
}

/// Records `(revision, size)` for every notification.
fn record_notifications(model: &mut ModelManager) -> Rc<RefCell<Vec<(u64, usize)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    model.add_observer(move |event: &AddressBookChanged<'_>| {
        sink.borrow_mut().push((event.revision, event.book.len()));
    });
    seen
}

#[test]
fn name_sort_is_case_insensitive() {
    let model = model_with(vec![contact("bob", &[]), contact("Alice", &[])]);
    assert_eq!(model.sort_mode(), SortMode::ByName);
    assert_eq!(model.projection().names(), vec!["Alice", "bob"]);
}

#[test]
fn earliest_tag_sort_puts_untagged_contacts_last() {
    let mut model = model_with(vec![
        contact("Empty", &[]),
        contact("Zebra", &["zebra"]),
        contact("Bee", &["bee"]),
        contact("AntBee", &["ant", "bee"]),
    ]);

    model.set_sort(SortMode::ByEarliestTag);

    assert_eq!(
        model.projection().names(),
        vec!["AntBee", "Bee", "Zebra", "Empty"]
    );
}

#[test]
fn earliest_tag_sort_keeps_store_order_for_untagged_ties() {
    let mut model = model_with(vec![
        contact("Carol", &[]),
        contact("Alice", &[]),
        contact("Bob", &["friend"]),
    ]);

    model.set_sort(SortMode::ByEarliestTag);

    assert_eq!(model.projection().names(), vec!["Bob", "Carol", "Alice"]);
}

#[test]
fn remove_tag_everywhere_scenario_reorders_live_projection() {
    let mut model = model_with(vec![contact("Alice", &["friend"]), contact("Bob", &[])]);
    model.set_sort(SortMode::ByEarliestTag);
    assert_eq!(model.projection().names(), vec!["Alice", "Bob"]);

    let removals = model
        .remove_tag_everywhere(&Tag::new("friend").unwrap())
        .unwrap();

    assert_eq!(removals.len(), 1);
    let projection = model.projection();
    assert!(projection.get(0).unwrap().tags.is_empty());
    // Both untagged: equal under the comparator, store order applies.
    assert_eq!(projection.names(), vec!["Alice", "Bob"]);
}

#[test]
fn projection_reflects_filter_and_mutations_immediately() {
    let mut model = model_with(vec![
        contact("Alice Pauline", &["friend"]),
        contact("Benson Meier", &[]),
        contact("Daniel Meier", &["friend"]),
    ]);

    model.set_filter(ContactFilter::name_contains_any(["meier"]));
    assert_eq!(model.projection().names(), vec!["Benson Meier", "Daniel Meier"]);

    model.delete_contact(&contact("Benson Meier", &[])).unwrap();
    assert_eq!(model.projection().names(), vec!["Daniel Meier"]);

    model.set_filter(ContactFilter::has_tag(Tag::new("friend").unwrap()));
    assert_eq!(
        model.projection().names(),
        vec!["Alice Pauline", "Daniel Meier"]
    );

    model.show_all();
    assert!(model.filter().is_show_all());
    assert_eq!(model.projection().len(), 2);
}

#[test]
fn name_keyword_filter_matches_whole_words_only() {
    let mut model = model_with(vec![contact("Alice Pauline", &[]), contact("Alicia", &[])]);

    model.set_filter(ContactFilter::name_contains_any(["ALICE"]));
    assert_eq!(model.projection().names(), vec!["Alice Pauline"]);

    model.set_filter(ContactFilter::name_contains_any(Vec::<String>::new()));
    assert!(model.projection().is_empty());
}

#[test]
fn add_contact_resets_filter_but_tag_removal_keeps_it() {
    let mut model = model_with(vec![contact("Alice", &["friend"]), contact("Bob", &[])]);

    model.set_filter(ContactFilter::name_contains_any(["Bob"]));
    model
        .remove_tag_everywhere(&Tag::new("friend").unwrap())
        .unwrap();
    assert_eq!(model.projection().names(), vec!["Bob"]);

    model.add_contact(contact("Carol", &[])).unwrap();
    assert!(model.filter().is_show_all());
    assert_eq!(model.projection().names(), vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn every_successful_mutation_notifies_exactly_once() {
    let mut model = model_with(vec![contact("Alice", &["friend"])]);
    let seen = record_notifications(&mut model);

    model.add_contact(contact("Bob", &[])).unwrap();
    model
        .update_contact(&contact("Bob", &[]), contact("Bobby", &[]))
        .unwrap();
    model.delete_contact(&contact("Bobby", &[])).unwrap();
    model
        .remove_tag_everywhere(&Tag::new("friend").unwrap())
        .unwrap();
    model.restore_contact(0, contact("Zed", &[])).unwrap();
    let previous = model.reset_data(AddressBook::new());

    assert_eq!(previous.len(), 2);
    assert_eq!(
        *seen.borrow(),
        vec![(1, 2), (2, 2), (3, 1), (4, 1), (5, 2), (6, 0)]
    );
    assert_eq!(model.revision(), 6);
}

#[test]
fn failed_mutations_and_view_changes_do_not_notify() {
    let mut model = model_with(vec![contact("Alice", &[])]);
    let seen = record_notifications(&mut model);
    let before = model.address_book().clone();

    let err = model.add_contact(contact("ALICE", &[])).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateContact(_)));
    let err = model.delete_contact(&contact("Bob", &[])).unwrap_err();
    assert!(matches!(err, StoreError::ContactNotFound(_)));
    let err = model
        .update_contact(&contact("Bob", &[]), contact("Bob", &[]))
        .unwrap_err();
    assert!(matches!(err, StoreError::ContactNotFound(_)));

    let err = model
        .remove_tag_everywhere(&Tag::new("enemy").unwrap())
        .unwrap_err();
    assert!(matches!(err, StoreError::TagNotFound(_)));

    model.set_sort(SortMode::ByEarliestTag);
    model.set_filter(ContactFilter::new("nobody", |_| false));

    assert!(seen.borrow().is_empty());
    assert_eq!(model.revision(), 0);
    assert_eq!(model.address_book(), &before);
}

#[test]
fn notification_payload_is_the_full_store_after_the_mutation() {
    let mut model = model_with(vec![contact("Alice", &[])]);
    model.set_filter(ContactFilter::new("nobody", |_| false));
    let snapshots: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    model.add_observer(move |event: &AddressBookChanged<'_>| {
        let names = event
            .book
            .contacts()
            .iter()
            .map(|contact| contact.name.to_string())
            .collect();
        sink.borrow_mut().push(names);
    });

    model.delete_contact(&contact("Alice", &[])).unwrap();
    model.restore_contact(0, contact("Alice", &[])).unwrap();

    assert_eq!(
        *snapshots.borrow(),
        vec![Vec::<String>::new(), vec!["Alice".to_string()]]
    );
}
