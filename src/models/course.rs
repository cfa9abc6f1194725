//! Course, teacher, and student models.
//!
//! Courses are the unit of placement: each course receives exactly one
//! slot/teacher/room assignment per candidate schedule. Students are
//! carried for validation and enrollment context only — the engine does
//! not schedule them individually.

use serde::{Deserialize, Serialize};

/// A course section to be placed on the weekly timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Weekly credit hours.
    pub credit_hours: u32,
    /// The teacher assigned to deliver this course.
    pub teacher_id: String,
    /// Minimum enrollment for the section to run.
    pub min_students: u32,
    /// Maximum enrollment; compared against room capacity.
    pub max_students: u32,
    /// Department tags.
    pub departments: Vec<String>,
}

/// A teacher with a bounded weekly workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum weekly teaching workload in hours.
    pub max_workload_hours: f64,
}

/// An enrolled student (validation/enrollment context only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Course {
    /// Creates a course taught by the given teacher.
    pub fn new(id: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            credit_hours: 3,
            teacher_id: teacher_id.into(),
            min_students: 0,
            max_students: 0,
            departments: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly credit hours.
    pub fn with_credit_hours(mut self, credit_hours: u32) -> Self {
        self.credit_hours = credit_hours;
        self
    }

    /// Sets the enrollment bounds.
    pub fn with_capacity(mut self, min_students: u32, max_students: u32) -> Self {
        self.min_students = min_students;
        self.max_students = max_students;
        self
    }

    /// Adds a department tag.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.departments.push(department.into());
        self
    }
}

impl Teacher {
    /// Creates a teacher with the default 40-hour weekly workload cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_workload_hours: 40.0,
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the maximum weekly workload in hours.
    pub fn with_max_workload(mut self, hours: f64) -> Self {
        self.max_workload_hours = hours;
        self
    }
}

impl Student {
    /// Creates a student.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the student name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("CS101", "T1")
            .with_name("Intro to Programming")
            .with_credit_hours(4)
            .with_capacity(10, 60)
            .with_department("CS");

        assert_eq!(c.id, "CS101");
        assert_eq!(c.teacher_id, "T1");
        assert_eq!(c.credit_hours, 4);
        assert_eq!(c.min_students, 10);
        assert_eq!(c.max_students, 60);
        assert_eq!(c.departments, vec!["CS".to_string()]);
    }

    #[test]
    fn test_teacher_defaults() {
        let t = Teacher::new("T1");
        assert!((t.max_workload_hours - 40.0).abs() < 1e-10);

        let t2 = Teacher::new("T2").with_max_workload(12.0);
        assert!((t2.max_workload_hours - 12.0).abs() < 1e-10);
    }
}
