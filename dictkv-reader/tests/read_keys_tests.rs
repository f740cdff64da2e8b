//! Integration tests for `DictionaryReader` against a hashed dictionary.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Int64Array, RecordBatch, StringArray, UInt16Array, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema, UInt16Type};
use dictkv_block::{Block, BlockColumn};
use dictkv_dictionary::{DictionaryCatalog, HashedDictionary, register_dictionary_functions};
use dictkv_function::{Callable, FunctionRegistry, FunctionResolver};
use dictkv_reader::{DictionaryReader, NOT_FOUND_POSITION, ReaderOptions};
use dictkv_result::{Error, Result};
use dictkv_test_utils::init_tracing_for_tests;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `users`: 10 -> ("Alice", 30), 12 -> ("Bob", 40).
fn users_catalog() -> Arc<DictionaryCatalog> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("age", DataType::UInt16, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(UInt64Array::from(vec![10, 12])),
            Arc::new(StringArray::from(vec!["Alice", "Bob"])),
            Arc::new(UInt16Array::from(vec![30, 40])),
        ],
    )
    .unwrap();
    let catalog = Arc::new(DictionaryCatalog::new());
    catalog
        .register(Arc::new(
            HashedDictionary::try_new("users", &batch, "id").unwrap(),
        ))
        .unwrap();
    catalog
}

fn registry_for(catalog: &Arc<DictionaryCatalog>) -> FunctionRegistry {
    init_tracing_for_tests();
    let mut registry = FunctionRegistry::new();
    register_dictionary_functions(&mut registry, Arc::clone(catalog)).unwrap();
    registry
}

fn result_fields() -> Vec<Field> {
    vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("age", DataType::UInt16, false),
    ]
}

fn users_reader() -> (Arc<DictionaryCatalog>, DictionaryReader) {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let reader =
        DictionaryReader::try_new(&registry, "users", &["name", "age"], &result_fields()).unwrap();
    (catalog, reader)
}

fn mask(found: &arrow::array::BooleanArray) -> Vec<bool> {
    found.values().iter().collect()
}

#[test]
fn end_to_end_lookup_compacts_found_rows() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(vec![10, 11, 12, 13, 14]);

    let result = reader.read_keys(&keys).unwrap();

    assert_eq!(mask(&result.found), vec![true, false, true, false, false]);
    assert_eq!(result.positions[0], 0);
    assert_eq!(result.positions[2], 1);
    for row in [1, 3, 4] {
        assert_eq!(result.positions[row], NOT_FOUND_POSITION);
        assert_eq!(result.output_row(row), None);
    }
    assert_eq!(result.output_row(2), Some(1));

    let batch = &result.batch;
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.schema().field(0).name(), "name");
    assert_eq!(batch.schema().field(1).name(), "age");

    let names = batch.column(0).as_string::<i32>();
    assert_eq!(
        names.iter().collect::<Vec<_>>(),
        vec![Some("Alice"), Some("Bob")]
    );
    let ages = batch.column(1).as_primitive::<UInt16Type>();
    assert_eq!(ages.values().to_vec(), vec![30, 40]);
}

#[test]
fn empty_input_produces_empty_outputs() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(Vec::<u64>::new());

    let result = reader.read_keys(&keys).unwrap();

    assert_eq!(result.found.len(), 0);
    assert!(result.positions.is_empty());
    assert_eq!(result.batch.num_rows(), 0);
    assert_eq!(result.batch.num_columns(), 2);
}

#[test]
fn all_missing_keys_produce_zero_rows() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(vec![1, 2, 3]);

    let result = reader.read_keys(&keys).unwrap();

    assert_eq!(mask(&result.found), vec![false, false, false]);
    assert_eq!(result.found_count(), 0);
    assert_eq!(result.batch.num_rows(), 0);
    assert!(result.positions.iter().all(|&p| p == NOT_FOUND_POSITION));
}

#[test]
fn repeated_calls_are_identical_and_leave_keys_untouched() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(vec![12, 10, 99, 12]);
    let before = keys.clone();

    let first = reader.read_keys(&keys).unwrap();
    let second = reader.read_keys(&keys).unwrap();

    assert_eq!(first, second);
    assert_eq!(keys, before);
    assert_eq!(first.positions[..2], [0, 1]);
    assert_eq!(first.positions[3], 2);
    assert!(reader.plan().sample_block().columns()[reader.plan().key_position()].is_empty());
}

#[test]
fn randomized_lookups_keep_length_count_and_order_invariants() {
    let (_catalog, reader) = users_reader();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let len = rng.random_range(0..64);
        let keys: Vec<u64> = (0..len).map(|_| rng.random_range(8..16)).collect();
        let result = reader.read_keys(&UInt64Array::from(keys.clone())).unwrap();

        assert_eq!(result.found.len(), len);
        assert_eq!(result.positions.len(), len);
        assert_eq!(result.found.null_count(), 0);
        let found_count = result.found.true_count();
        assert_eq!(result.batch.num_rows(), found_count);

        let mut last = None;
        for (row, key) in keys.iter().enumerate() {
            let expected_found = *key == 10 || *key == 12;
            assert_eq!(result.found.value(row), expected_found);
            if let Some(out) = result.output_row(row) {
                assert!(last.is_none_or(|prev| prev < out));
                last = Some(out);
                let age = result.batch.column(1).as_primitive::<UInt16Type>().value(out);
                assert_eq!(age, if *key == 10 { 30 } else { 40 });
            }
        }
    }
}

#[test]
fn rows_argument_truncates_or_pads_keys() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(vec![10, 12, 11]);

    let truncated = reader.read_keys_with_rows(&keys, 1).unwrap();
    assert_eq!(mask(&truncated.found), vec![true]);
    assert_eq!(truncated.batch.num_rows(), 1);

    let padded = reader.read_keys_with_rows(&keys, 5).unwrap();
    assert_eq!(mask(&padded.found), vec![true, true, false, false, false]);
    assert_eq!(padded.batch.num_rows(), 2);
}

#[test]
fn nullable_declared_types_bind_against_plain_attributes() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let fields = vec![Field::new("years", DataType::UInt16, true)];

    let reader = DictionaryReader::try_new(&registry, "users", &["age"], &fields).unwrap();
    let result = reader.read_keys(&UInt64Array::from(vec![12])).unwrap();

    assert_eq!(result.batch.schema().field(0).name(), "years");
    assert!(result.batch.schema().field(0).is_nullable());
    assert_eq!(
        result.batch.column(0).as_primitive::<UInt16Type>().value(0),
        40
    );
}

#[test]
fn zero_result_columns_still_report_found_rows() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let reader = DictionaryReader::try_new::<&str>(&registry, "users", &[], &[]).unwrap();

    let result = reader.read_keys(&UInt64Array::from(vec![10, 11, 12])).unwrap();

    assert_eq!(result.batch.num_columns(), 0);
    assert_eq!(result.batch.num_rows(), 2);
    assert_eq!(result.positions[2], 1);
}

#[test]
fn column_count_mismatch_is_rejected() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let fields = vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("age", DataType::UInt16, false),
        Field::new("extra", DataType::UInt16, false),
    ];

    let err = DictionaryReader::try_new(&registry, "users", &["name", "age"], &fields).unwrap_err();
    assert!(matches!(
        err,
        Error::ColumnCountMismatch {
            source_columns: 2,
            result_columns: 3
        }
    ));
}

#[test]
fn get_type_mismatch_names_the_attribute() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let fields = vec![Field::new("name", DataType::UInt64, false)];

    let err = DictionaryReader::try_new(&registry, "users", &["name"], &fields).unwrap_err();
    match err {
        Error::TypeMismatch {
            column,
            expected,
            actual,
        } => {
            assert_eq!(column, "name");
            assert_eq!(expected, DataType::UInt64);
            assert_eq!(actual, DataType::Utf8);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn composite_keys_are_unsupported() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);
    let options = ReaderOptions::default().with_key_arity(2);

    let err = DictionaryReader::try_new_with_options(
        &registry,
        "users",
        &["name", "age"],
        &result_fields(),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

#[test]
fn unknown_names_fail_at_construction() {
    let catalog = users_catalog();
    let registry = registry_for(&catalog);

    assert!(matches!(
        DictionaryReader::try_new(&registry, "orders", &["name"], &result_fields()[..1]),
        Err(Error::DictionaryNotFound(name)) if name == "orders"
    ));
    assert!(matches!(
        DictionaryReader::try_new(&registry, "users", &["email"], &result_fields()[..1]),
        Err(Error::AttributeNotFound { .. })
    ));
    assert!(matches!(
        DictionaryReader::try_new(&FunctionRegistry::new(), "users", &["name"], &result_fields()[..1]),
        Err(Error::FunctionNotFound(_))
    ));
}

#[test]
fn dictionary_failures_propagate_from_lookups() {
    let (catalog, reader) = users_reader();
    catalog.remove("users").unwrap();

    let err = reader.read_keys(&UInt64Array::from(vec![10])).unwrap_err();
    assert!(matches!(err, Error::DictionaryNotFound(name) if name == "users"));
}

#[test]
fn wrong_key_type_is_rejected() {
    let (_catalog, reader) = users_reader();
    let keys: ArrayRef = Arc::new(Int64Array::from(vec![10]));

    assert!(matches!(
        reader.read_keys(keys.as_ref()),
        Err(Error::InvalidArgumentError(_))
    ));
}

#[test]
fn shared_reader_serves_concurrent_calls() {
    let (_catalog, reader) = users_reader();
    let keys = UInt64Array::from(vec![14, 12, 10, 11]);
    let expected = reader.read_keys(&keys).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reader = reader.clone();
                let keys = keys.clone();
                scope.spawn(move || {
                    (0..25)
                        .map(|_| reader.read_keys(&keys).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for result in handle.join().unwrap() {
                assert_eq!(result, expected);
            }
        }
    });
}

/// `dictHas` stand-in whose declared return type is not Boolean.
struct UInt8HasResolver;

#[derive(Debug)]
struct UInt8Has {
    return_type: DataType,
}

impl Callable for UInt8Has {
    fn name(&self) -> &str {
        "dictHas"
    }

    fn return_type(&self) -> &DataType {
        &self.return_type
    }

    fn invoke(&self, _: &mut Block, _: &[usize], _: usize, _: usize) -> Result<()> {
        unreachable!("never bound")
    }
}

impl FunctionResolver for UInt8HasResolver {
    fn name(&self) -> &str {
        "dictHas"
    }

    fn build(&self, _arguments: &[BlockColumn]) -> Result<Arc<dyn Callable>> {
        Ok(Arc::new(UInt8Has {
            return_type: DataType::UInt8,
        }))
    }
}

#[test]
fn has_type_mismatch_is_rejected() {
    let mut registry = FunctionRegistry::new();
    registry.register(Arc::new(UInt8HasResolver)).unwrap();

    let err = DictionaryReader::try_new(&registry, "users", &["name"], &result_fields()[..1])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::TypeMismatch { ref column, expected: DataType::Boolean, actual: DataType::UInt8 }
            if column == "has"
    ));
}

#[test]
fn key_slot_type_is_uint64() {
    let (_catalog, reader) = users_reader();
    let plan = reader.plan();
    let key = &plan.sample_block().columns()[plan.key_position()];
    assert_eq!(key.data_type, DataType::UInt64);
    assert_eq!(plan.get_functions().len(), 2);
    assert_eq!(plan.source_columns(), &["name".to_string(), "age".to_string()]);
}
