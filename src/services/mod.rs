pub mod auth;
pub mod courses;
pub mod expenses;
pub mod finance;
pub mod payments;
pub mod students;
pub mod system;
pub mod teachers;

pub use auth::AuthService;
pub use courses::CourseService;
pub use expenses::ExpenseService;
pub use finance::FinanceService;
pub use payments::PaymentService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;
