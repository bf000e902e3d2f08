//! 预导入模块，方便使用

pub use super::course_teachers::{
    ActiveModel as CourseTeacherActiveModel, Entity as CourseTeachers, Model as CourseTeacherModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::expenses::{
    ActiveModel as ExpenseActiveModel, Entity as Expenses, Model as ExpenseModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::roles::{ActiveModel as RoleActiveModel, Entity as Roles, Model as RoleModel};
pub use super::student_courses::{
    ActiveModel as StudentCourseActiveModel, Entity as StudentCourses, Model as StudentCourseModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::user_roles::{
    ActiveModel as UserRoleActiveModel, Entity as UserRoles, Model as UserRoleModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
