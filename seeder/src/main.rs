use crate::seed::{Seeder, run_seeder};
use crate::seeds::person::PersonSeeder;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [(Box::new(PersonSeeder) as Box<dyn Seeder + Send + Sync>, "Person")] {
        run_seeder(&*seeder, name, &db).await;
    }
}
