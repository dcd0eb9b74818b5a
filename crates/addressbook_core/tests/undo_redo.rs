use addressbook_core::{
    AddCommand, Address, AddressBook, AddressBookChanged, ClearCommand, Command, CommandContext,
    CommandError, Contact, DeleteCommand, DeleteTagCommand, EditCommand, EditContactDescriptor,
    Email, EntryState, FindCommand, LogicManager, ModelManager, Mutation, Name, Phone, SortMode,
    StoreError, Tag, UndoRedoStack,
};
use std::cell::Cell;
use std::rc::Rc;

fn contact(name: &str, tags: &[&str]) -> Contact {
    Contact::new(
        Name::new(name).unwrap(),
        Phone::new("98765432").unwrap(),
        Email::new("person@example.com").unwrap(),
        Address::new("311, Clementi Ave 2").unwrap(),
    )
    .with_tags(tags.iter().map(|tag| Tag::new(tag).unwrap()))
}

fn logic_with(contacts: Vec<Contact>) -> LogicManager {
    LogicManager::new(ModelManager::new(
        AddressBook::from_contacts(contacts).unwrap(),
    ))
}

fn store_names(logic: &LogicManager) -> Vec<String> {
    logic
        .model()
        .address_book()
        .contacts()
        .iter()
        .map(|contact| contact.name.to_string())
        .collect()
}

fn add(name: &str) -> Command {
    Command::Add(AddCommand::new(contact(name, &[])))
}

fn delete_first() -> Command {
    Command::Delete(DeleteCommand::new(0))
}

#[test]
fn undo_twice_restores_deleted_contacts_in_original_order() {
    let mut logic = logic_with(vec![contact("Alice", &[]), contact("Bob", &[])]);

    logic.execute(delete_first()).unwrap();
    logic.execute(delete_first()).unwrap();
    assert!(logic.model().address_book().is_empty());

    logic.execute(Command::Undo).unwrap();
    assert_eq!(store_names(&logic), vec!["Bob"]);
    logic.execute(Command::Undo).unwrap();
    assert_eq!(store_names(&logic), vec!["Alice", "Bob"]);

    let err = logic.execute(Command::Undo).unwrap_err();
    assert_eq!(err, CommandError::NothingToUndo);
    assert_eq!(logic.history().redoable().len(), 2);
}

#[test]
fn new_mutation_after_undo_clears_redo_history() {
    let mut logic = logic_with(vec![contact("Alice", &[]), contact("Bob", &[])]);

    logic.execute(add("Carol")).unwrap();
    logic.execute(Command::Undo).unwrap();
    assert!(logic.history().can_redo());

    logic.execute(delete_first()).unwrap();
    assert!(!logic.history().can_redo());

    let err = logic.execute(Command::Redo).unwrap_err();
    assert_eq!(err, CommandError::NothingToRedo);
    assert_eq!(store_names(&logic), vec!["Bob"]);
}

#[test]
fn add_then_delete_then_redo_reports_nothing_to_redo() {
    let mut logic = logic_with(vec![contact("Alice", &[]), contact("Bob", &[])]);

    logic.execute(add("Carol")).unwrap();
    logic.execute(delete_first()).unwrap();

    assert_eq!(
        logic.execute(Command::Redo).unwrap_err(),
        CommandError::NothingToRedo
    );
}

#[test]
fn undoable_depth_matches_successful_mutations() {
    let mut logic = logic_with(vec![contact("Alice", &["friend"])]);

    logic.execute(add("Bob")).unwrap();
    logic.execute(add("Carol")).unwrap();
    logic
        .execute(Command::DeleteTag(DeleteTagCommand::new(
            Tag::new("friend").unwrap(),
        )))
        .unwrap();
    logic.execute(delete_first()).unwrap();

    let history = logic.history();
    assert_eq!(history.undoable().len(), 4);
    assert!(history.redoable().is_empty());
    let words: Vec<&str> = history.undoable().iter().map(|entry| entry.word()).collect();
    assert_eq!(words, vec!["add", "add", "deletetag", "delete"]);
    assert!(history
        .undoable()
        .iter()
        .all(|entry| entry.state() == EntryState::Executed));
}

#[test]
fn undo_then_redo_round_trip_keeps_store_content() {
    let mut logic = logic_with(vec![contact("Alice", &[]), contact("Bob", &[])]);
    logic.execute(add("Carol")).unwrap();
    logic.execute(Command::Delete(DeleteCommand::new(1))).unwrap();
    let after_commands = logic.model().address_book().clone();

    logic.execute(Command::Undo).unwrap();
    assert_eq!(store_names(&logic), vec!["Alice", "Bob", "Carol"]);
    assert_eq!(logic.history().redoable()[0].state(), EntryState::Inverted);

    logic.execute(Command::Redo).unwrap();
    assert_eq!(logic.model().address_book(), &after_commands);
    assert_eq!(logic.history().undoable().len(), 2);
    assert!(logic.history().redoable().is_empty());
}

#[test]
fn undo_and_redo_move_the_same_entry_between_stacks() {
    let mut logic = logic_with(vec![]);
    logic.execute(add("Alice")).unwrap();
    let id = logic.history().undoable()[0].id();

    logic.execute(Command::Undo).unwrap();
    assert_eq!(logic.history().redoable()[0].id(), id);
    logic.execute(Command::Redo).unwrap();
    assert_eq!(logic.history().undoable()[0].id(), id);
}

#[test]
fn redo_fails_when_target_was_invalidated_independently() {
    let mut logic = logic_with(vec![contact("Alice", &[])]);
    logic.execute(add("Carol")).unwrap();
    logic.execute(Command::Undo).unwrap();

    logic
        .model_mut()
        .add_contact(contact("Carol", &["gym"]))
        .unwrap();

    let err = logic.execute(Command::Redo).unwrap_err();
    assert!(matches!(
        err,
        CommandError::RedoFailed {
            command: "add",
            source: StoreError::DuplicateContact(_),
        }
    ));
    assert!(!logic.history().can_redo());
    assert!(!logic.history().can_undo());
}

#[test]
fn redo_of_tag_deletion_fails_once_the_tag_is_gone() {
    let tagged = contact("Alice", &["friend"]);
    let mut logic = logic_with(vec![tagged.clone()]);
    let count = Rc::new(Cell::new(0_u32));
    let sink = Rc::clone(&count);
    logic
        .model_mut()
        .add_observer(move |_: &AddressBookChanged<'_>| sink.set(sink.get() + 1));

    logic
        .execute(Command::DeleteTag(DeleteTagCommand::new(
            Tag::new("friend").unwrap(),
        )))
        .unwrap();
    logic.execute(Command::Undo).unwrap();
    logic
        .model_mut()
        .update_contact(&tagged, contact("Alice", &[]))
        .unwrap();
    let revision = logic.model().revision();

    let err = logic.execute(Command::Redo).unwrap_err();
    assert!(matches!(
        err,
        CommandError::RedoFailed {
            command: "deletetag",
            source: StoreError::TagNotFound(_),
        }
    ));
    assert_eq!(logic.model().revision(), revision);
    assert_eq!(count.get(), 3);
    assert!(!logic.history().can_undo());
    assert!(!logic.history().can_redo());
}

#[test]
fn undo_fails_and_discards_entry_when_store_drifted() {
    let mut logic = logic_with(vec![contact("Alice", &[])]);
    logic.execute(add("Carol")).unwrap();
    logic.execute(add("Dan")).unwrap();

    logic
        .model_mut()
        .delete_contact(&contact("Dan", &[]))
        .unwrap();

    let err = logic.execute(Command::Undo).unwrap_err();
    assert!(matches!(
        err,
        CommandError::UndoFailed {
            command: "add",
            source: StoreError::ContactNotFound(_),
        }
    ));
    assert!(!logic.history().can_redo());
    assert_eq!(logic.history().undoable().len(), 1);

    logic.execute(Command::Undo).unwrap();
    assert_eq!(store_names(&logic), vec!["Alice"]);
}

#[test]
fn failed_commands_leave_history_untouched() {
    let mut logic = logic_with(vec![contact("Alice", &[])]);
    logic.execute(add("Bob")).unwrap();
    logic.execute(Command::Undo).unwrap();

    let err = logic
        .execute(Command::Delete(DeleteCommand::new(5)))
        .unwrap_err();
    assert_eq!(err, CommandError::InvalidIndex { index: 5, visible: 1 });

    let err = logic.execute(add("alice")).unwrap_err();
    assert!(matches!(err, CommandError::Store(StoreError::DuplicateContact(_))));

    let err = logic
        .execute(Command::Edit(EditCommand::new(
            0,
            EditContactDescriptor::default(),
        )))
        .unwrap_err();
    assert_eq!(err, CommandError::NotEdited);

    let err = logic
        .execute(Command::DeleteTag(DeleteTagCommand::new(
            Tag::new("unused").unwrap(),
        )))
        .unwrap_err();
    assert!(matches!(err, CommandError::TagNotFound(_)));

    assert!(!logic.history().can_undo());
    assert_eq!(logic.history().redoable().len(), 1);
    logic.execute(Command::Redo).unwrap();
    assert_eq!(store_names(&logic), vec!["Alice", "Bob"]);
}

#[test]
fn view_commands_do_not_touch_history() {
    let mut logic = logic_with(vec![contact("Alice", &["friend"]), contact("Bob", &[])]);
    logic.execute(add("Carol")).unwrap();
    logic.execute(Command::Undo).unwrap();

    logic
        .execute(Command::Find(FindCommand::new(["bob"])))
        .unwrap();
    logic
        .execute(Command::Sort(SortMode::ByEarliestTag))
        .unwrap();
    logic.execute(Command::List).unwrap();

    assert!(!logic.history().can_undo());
    assert_eq!(logic.history().redoable().len(), 1);
    assert_eq!(logic.model().sort_mode(), SortMode::ByEarliestTag);
}

#[test]
fn delete_addresses_contacts_by_visible_index() {
    let mut logic = logic_with(vec![
        contact("Alice Pauline", &[]),
        contact("Benson Meier", &[]),
        contact("Daniel Meier", &[]),
    ]);
    let outcome = logic
        .execute(Command::Find(FindCommand::new(["Meier"])))
        .unwrap();
    assert_eq!(outcome.feedback, "2 contacts listed!");

    logic
        .execute(Command::Delete(DeleteCommand::new(1)))
        .unwrap();
    assert_eq!(store_names(&logic), vec!["Alice Pauline", "Benson Meier"]);

    let err = logic
        .execute(Command::Delete(DeleteCommand::new(1)))
        .unwrap_err();
    assert_eq!(err, CommandError::InvalidIndex { index: 1, visible: 1 });
}

#[test]
fn edit_undo_and_redo_swap_contact_in_place() {
    let mut logic = logic_with(vec![contact("Alice", &["friend"]), contact("Bob", &[])]);
    let descriptor = EditContactDescriptor {
        name: Some(Name::new("Alicia").unwrap()),
        tags: Some(Default::default()),
        ..Default::default()
    };

    logic
        .execute(Command::Edit(EditCommand::new(0, descriptor)))
        .unwrap();
    assert_eq!(store_names(&logic), vec!["Alicia", "Bob"]);
    assert!(logic.model().address_book().contacts()[0].tags.is_empty());

    logic.execute(Command::Undo).unwrap();
    assert_eq!(logic.model().address_book().contacts()[0], contact("Alice", &["friend"]));

    logic.execute(Command::Redo).unwrap();
    assert_eq!(store_names(&logic), vec!["Alicia", "Bob"]);
}

#[test]
fn edit_into_existing_name_is_rejected() {
    let mut logic = logic_with(vec![contact("Alice", &[]), contact("Bob", &[])]);
    let descriptor = EditContactDescriptor {
        name: Some(Name::new("bob").unwrap()),
        ..Default::default()
    };

    let err = logic
        .execute(Command::Edit(EditCommand::new(0, descriptor)))
        .unwrap_err();
    assert!(matches!(err, CommandError::Store(StoreError::DuplicateContact(_))));
    assert!(!logic.history().can_undo());
}

#[test]
fn delete_tag_undo_restores_tags_on_every_contact() {
    let original = vec![
        contact("Alice", &["friend", "colleague"]),
        contact("Bob", &[]),
        contact("Carol", &["friend"]),
    ];
    let mut logic = logic_with(original.clone());

    logic
        .execute(Command::DeleteTag(DeleteTagCommand::new(
            Tag::new("friend").unwrap(),
        )))
        .unwrap();
    assert!(!logic
        .model()
        .address_book()
        .tags()
        .contains(&Tag::new("friend").unwrap()));

    logic.execute(Command::Undo).unwrap();
    assert_eq!(logic.model().address_book().contacts(), original.as_slice());

    logic.execute(Command::Redo).unwrap();
    match logic.history().undoable()[0].mutation() {
        Mutation::TagRemoved { removals, .. } => assert_eq!(removals.len(), 2),
        other => panic!("unexpected mutation: {other:?}"),
    }
}

#[test]
fn clear_undo_restores_previous_contents() {
    let original = vec![contact("Alice", &[]), contact("Bob", &["friend"])];
    let mut logic = logic_with(original.clone());

    logic.execute(Command::Clear(ClearCommand)).unwrap();
    assert!(logic.model().address_book().is_empty());

    logic.execute(Command::Undo).unwrap();
    assert_eq!(logic.model().address_book().contacts(), original.as_slice());

    logic.execute(Command::Redo).unwrap();
    assert!(logic.model().address_book().is_empty());
}

#[test]
fn undo_and_redo_notify_observers_once_each() {
    let mut logic = logic_with(vec![contact("Alice", &[])]);
    let count = Rc::new(Cell::new(0_u32));
    let sink = Rc::clone(&count);
    logic
        .model_mut()
        .add_observer(move |_: &AddressBookChanged<'_>| sink.set(sink.get() + 1));

    logic.execute(add("Bob")).unwrap();
    logic.execute(Command::Undo).unwrap();
    logic.execute(Command::Redo).unwrap();
    let _ = logic.execute(Command::Redo);

    assert_eq!(count.get(), 3);
}

#[test]
fn commands_run_against_an_explicit_context() {
    let mut model = ModelManager::new(AddressBook::new());
    let mut history = UndoRedoStack::new();

    {
        let mut ctx = CommandContext::new(&mut model, &mut history);
        let outcome = add("Alice").execute(&mut ctx).unwrap();
        assert_eq!(outcome.feedback, "New contact added: Alice");
        add("Bob").execute(&mut ctx).unwrap();
        Command::Undo.execute(&mut ctx).unwrap();
    }

    assert_eq!(model.address_book().len(), 1);
    assert_eq!(history.undoable().len(), 1);
    assert_eq!(history.redoable().len(), 1);
}
