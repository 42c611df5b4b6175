//! Data generators for benchmarks

use docstore::collection::Document;
use docstore::doc;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

/// Generate documents keyed on `id` with a mix of string, number and bool
/// fields. `lastName`, `city` and `email` are string fields worth indexing.
pub fn generate_simple_docs(count: usize) -> Vec<Document> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email: String = FreeEmail().fake();
            let company: String = CompanyName().fake();
            let city: String = CityName().fake();
            let age: i64 = rng.gen_range(18..80);
            let salary: f64 = rng.gen_range(30000.0..200000.0);

            doc! {
                id: doc_id(i),
                firstName: first_name,
                lastName: last_name,
                email: email,
                company: company,
                city: city,
                age: age,
                salary: salary,
                active: rng.gen_bool(0.8),
            }
        })
        .collect()
}

/// Generate a single cheap document without faker data
pub fn generate_single_doc(id: usize) -> Document {
    doc! {
        id: doc_id(id),
        name: format!("name-{:08}", id),
        group: format!("group-{}", id % 16),
        value: id,
    }
}

/// Primary key used by the generators for document number `i`
pub fn doc_id(i: usize) -> String {
    format!("doc-{:08}", i)
}

/// Random lower-case string of `len` letters, for range bounds
pub fn random_word(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}
