use crate::seed::Seeder;
use db::models::person::{Category, Model};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct PersonSeeder;

const COURSES: &[&str] = &["B.Tech CSE", "B.Tech IT", "B.Tech ECE", "B.Tech Mechanical"];
const DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Information Technology",
    "Electronics",
    "Mechanical",
];

#[async_trait::async_trait]
impl Seeder for PersonSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed demo accounts
        let _ = Model::create(
            db,
            "Asha Iyer",
            "21CSE001",
            "asha@example.com",
            "password123",
            Category::Student,
            Some(3),
            Some("B.Tech CSE"),
            Some("Computer Science"),
        )
        .await;
        let _ = Model::create(
            db,
            "Prof. Meena Rao",
            "FAC101",
            "meena.rao@example.com",
            "password123",
            Category::Faculty,
            None,
            None,
            Some("Computer Science"),
        )
        .await;

        // Random students
        for i in 0..20 {
            let dept_idx = fastrand::usize(..DEPARTMENTS.len());
            let roll = format!("21CSE{:03}", 100 + i);
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let _ = Model::create(
                db,
                &name,
                &roll,
                &email,
                "password123",
                Category::Student,
                Some(fastrand::i32(1..=4)),
                Some(COURSES[fastrand::usize(..COURSES.len())]),
                Some(DEPARTMENTS[dept_idx]),
            )
            .await;
        }

        // A couple more faculty
        for i in 0..3 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let _ = Model::create(
                db,
                &name,
                &format!("FAC{:03}", 200 + i),
                &email,
                "password123",
                Category::Faculty,
                None,
                None,
                Some(DEPARTMENTS[fastrand::usize(..DEPARTMENTS.len())]),
            )
            .await;
        }
    }
}
