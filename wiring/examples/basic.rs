//! Basic example of the wiring container.
//!
//! Run with `RUST_LOG=wiring_container=trace` to watch resolution.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wiring::prelude::*;

// === Define your types ===

struct Config {
    database_url: String,
}

#[derive(Injectable)]
struct Database {
    #[inject(name = "config")]
    config: Arc<Config>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!("{sql} on {}", self.config.database_url)
    }
}

#[derive(Injectable)]
struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

#[derive(Injectable)]
struct UserService {
    repo: Arc<UserRepository>,
    #[inject(skip)]
    lookups: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut container = Container::new();
    container
        .bind_factory("config", || {
            Some(Instance::new(Config {
                database_url: "postgres://localhost/myapp".to_string(),
            }))
        })
        .bind("users", Identifier::of::<UserService>());

    container.validate()?;
    println!("{container:?}");

    let service: Arc<UserService> = container.resolve("users")?;
    println!("{} (lookups so far: {})", service.repo.find_user(42), service.lookups);

    // Transient: a second request builds a whole new graph.
    let again: Arc<UserService> = container.resolve("users")?;
    println!("same repository? {}", Arc::ptr_eq(&service.repo, &again.repo));

    match container.get("Mailer") {
        Ok(_) => println!("unexpected"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}
