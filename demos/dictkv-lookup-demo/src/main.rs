use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray, UInt16Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::util::pretty::pretty_format_batches;
use dictkv::{DictionaryCatalog, DictionaryReader, HashedDictionary, NOT_FOUND_POSITION};
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error(transparent)]
    Dictkv(#[from] dictkv::Error),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

type Result<T> = std::result::Result<T, Error>;

const DICTIONARY: &str = "users";
const KEYS: [u64; 5] = [10, 11, 12, 13, 14];

fn users_dictionary() -> Result<HashedDictionary> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("age", DataType::UInt16, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(vec![10, 12, 20])),
        Arc::new(StringArray::from(vec!["Alice", "Bob", "Carol"])),
        Arc::new(UInt16Array::from(vec![30, 40, 50])),
    ];
    let batch = RecordBatch::try_new(schema, columns)?;
    Ok(HashedDictionary::try_new(DICTIONARY, &batch, "id")?)
}

fn run() -> Result<()> {
    let catalog = Arc::new(DictionaryCatalog::new());
    catalog.register(Arc::new(users_dictionary()?))?;
    let registry = dictkv::registry_for_catalog(Arc::clone(&catalog))?;

    let reader = DictionaryReader::try_new(
        &registry,
        DICTIONARY,
        &["name", "age"],
        &[
            Field::new("name", DataType::Utf8, false),
            Field::new("age", DataType::UInt16, false),
        ],
    )?;

    let keys = UInt64Array::from(KEYS.to_vec());
    let result = reader.read_keys(&keys)?;
    tracing::info!(
        keys = result.num_keys(),
        found = result.found_count(),
        "lookup finished"
    );

    println!("key  found  position");
    for (row, key) in KEYS.iter().enumerate() {
        let position = match result.positions[row] {
            NOT_FOUND_POSITION => "-".to_string(),
            position => position.to_string(),
        };
        println!("{key:<4} {:<6} {position}", result.found.value(row));
    }
    println!();
    println!("{}", pretty_format_batches(&[result.batch])?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
