//! Student use-case service.
//!
//! Deletion is two-step: `plan_delete` describes what will be removed and
//! `confirm_delete` executes it, so the caller owns the confirmation UI.

use crate::model::student::{Student, StudentPatch};
use crate::model::StudentId;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;
use crate::store::DatabaseStore;

/// Form input for a new student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub parent_name: String,
    pub parent_phone: String,
}

/// Pending cascade delete awaiting caller confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub student_id: StudentId,
    pub student_name: String,
    /// Evaluations that the cascade will remove.
    pub evaluation_count: usize,
}

pub struct StudentService<'s, S: DatabaseStore> {
    store: &'s S,
    repo: StudentRepository<'s, S>,
}

impl<'s, S: DatabaseStore> StudentService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            repo: StudentRepository::new(store),
        }
    }

    /// Creates a student with a generated id and current timestamp.
    pub fn create_student(&self, input: NewStudent) -> RepoResult<Student> {
        let mut student = Student::new(input.name.trim());
        student.phone = input.phone;
        student.parent_name = input.parent_name;
        student.parent_phone = input.parent_phone;

        self.repo.add_student(&student)?;
        Ok(student)
    }

    /// Applies `patch`; returns whether the student exists.
    pub fn update_student(&self, id: &StudentId, patch: &StudentPatch) -> RepoResult<bool> {
        if patch.is_empty() {
            return Ok(self.repo.get_student(id).is_some());
        }
        self.repo.update_student(id, patch)
    }

    /// Describes the cascade for `id`, or `None` when the student is unknown.
    pub fn plan_delete(&self, id: &StudentId) -> Option<DeletePlan> {
        let db = self.store.load();
        let student = db.student(id)?;
        Some(DeletePlan {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            evaluation_count: db.evaluations_of(id).count(),
        })
    }

    /// Executes a confirmed plan. A plan for an already-removed student is a
    /// no-op returning `false`.
    pub fn confirm_delete(&self, plan: DeletePlan) -> RepoResult<bool> {
        self.repo.delete_student(&plan.student_id)
    }

    pub fn list_students(&self) -> Vec<Student> {
        self.repo.list_students()
    }

    /// Case-insensitive substring match on names; a blank query matches all.
    pub fn search(&self, query: &str) -> Vec<Student> {
        let needle = query.trim().to_lowercase();
        let mut students = self.repo.list_students();
        if !needle.is_empty() {
            students.retain(|student| student.name.to_lowercase().contains(&needle));
        }
        students
    }
}
