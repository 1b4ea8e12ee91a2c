use library_catalog::{
    count_by_genre, filter_books, import_csv, summary, write_csv, BookStore, Genre, GenreFilter,
    Summary,
};

#[test]
fn dune_orwell_sapiens_scenario() {
    let store = BookStore::open_in_memory().unwrap();
    store.add("Dune", "Herbert", Genre::SciFi).unwrap();
    let orwell = store.add("1984", "Orwell", Genre::SciFi).unwrap();
    store.add("Sapiens", "Harari", Genre::History).unwrap();

    let books = store.list_all().unwrap();
    let counts = count_by_genre(&books);
    assert_eq!(counts.get(Genre::SciFi), 2);
    assert_eq!(counts.get(Genre::History), 1);
    assert_eq!(counts.len(), 2);
    assert_eq!(
        summary(&books),
        Summary {
            total: 3,
            unique_genres: 2
        }
    );

    store.delete(&orwell.id).unwrap();

    let counts = count_by_genre(&store.list_all().unwrap());
    assert_eq!(counts.get(Genre::SciFi), 1);
    assert_eq!(counts.get(Genre::History), 1);
    assert_eq!(counts.len(), 2);
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("library.sqlite");

    let added = {
        let store = BookStore::open(&path).unwrap();
        store.add("Emma", "Austen", Genre::Fiction).unwrap()
    };

    let store = BookStore::open(&path).unwrap();
    assert_eq!(store.list_all().unwrap(), vec![added]);
}

#[test]
fn export_then_import_into_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("library_collection.csv");

    let source = BookStore::open_in_memory().unwrap();
    source.add("Dune", "Herbert", Genre::SciFi).unwrap();
    source.add("Gone Girl", "Flynn, Gillian", Genre::Mystery).unwrap();
    write_csv(&source.list_all().unwrap(), &csv_path).unwrap();

    let target = BookStore::open_in_memory().unwrap();
    import_csv(&target, &csv_path).unwrap();

    let tuples = |store: &BookStore| {
        store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| (b.title, b.author, b.genre, b.added_on))
            .collect::<Vec<_>>()
    };
    assert_eq!(tuples(&source), tuples(&target));

    let mysteries = filter_books(
        &target.list_all().unwrap(),
        GenreFilter::Only(Genre::Mystery),
    );
    assert_eq!(mysteries.len(), 1);
    assert_eq!(mysteries[0].author, "Flynn, Gillian");
}
