//! Student persistence operations.
//!
//! # Invariants
//! - `delete_student` removes the student and all of its evaluations with a
//!   single save.
//! - Insertion order of `students` is preserved (display order).

use super::RepoResult;
use crate::model::database::Database;
use crate::model::student::{Student, StudentPatch};
use crate::model::StudentId;
use crate::store::DatabaseStore;
use log::{debug, info};

/// Student repository bound to one store handle.
pub struct StudentRepository<'s, S: DatabaseStore> {
    store: &'s S,
}

impl<'s, S: DatabaseStore> StudentRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Appends a caller-built student (id and `created_at` already set).
    pub fn add_student(&self, student: &Student) -> RepoResult<StudentId> {
        student.validate()?;

        let mut db = self.store.load();
        db.students.push(student.clone());
        self.store.save(&db)?;

        info!(
            "event=student_add module=repo status=ok students={}",
            db.students.len()
        );
        Ok(student.id.clone())
    }

    /// Shallow-merges `patch` into the stored student.
    ///
    /// Returns `false` without writing when `id` is unknown.
    pub fn update_student(&self, id: &StudentId, patch: &StudentPatch) -> RepoResult<bool> {
        let mut db = self.store.load();
        let Some(student) = db.student_mut(id) else {
            debug!("event=student_update module=repo status=noop reason=not_found");
            return Ok(false);
        };

        student.apply(patch);
        student.validate()?;
        self.store.save(&db)?;

        info!("event=student_update module=repo status=ok");
        Ok(true)
    }

    /// Removes the student and cascades to its evaluations.
    ///
    /// Returns `false` without writing when `id` is unknown.
    pub fn delete_student(&self, id: &StudentId) -> RepoResult<bool> {
        let mut db = self.store.load();
        let Some(removed_evaluations) = remove_student_cascade(&mut db, id) else {
            debug!("event=student_delete module=repo status=noop reason=not_found");
            return Ok(false);
        };

        self.store.save(&db)?;
        info!(
            "event=student_delete module=repo status=ok removed_evaluations={removed_evaluations}"
        );
        Ok(true)
    }

    pub fn get_student(&self, id: &StudentId) -> Option<Student> {
        self.store.load().student(id).cloned()
    }

    /// All students in display order.
    pub fn list_students(&self) -> Vec<Student> {
        self.store.load().students
    }
}

/// Drops one student and every evaluation referencing it.
///
/// Returns the number of evaluations removed, or `None` when the student
/// does not exist (in which case `db` is untouched).
fn remove_student_cascade(db: &mut Database, id: &StudentId) -> Option<usize> {
    let position = db.students.iter().position(|student| &student.id == id)?;
    db.students.remove(position);

    let before = db.evaluations.len();
    db.evaluations.retain(|evaluation| &evaluation.student_id != id);
    Some(before - db.evaluations.len())
}

#[cfg(test)]
mod tests {
    use super::remove_student_cascade;
    use crate::model::database::Database;
    use crate::model::evaluation::Evaluation;
    use crate::model::student::Student;
    use crate::model::StudentId;
    use chrono::NaiveDate;

    #[test]
    fn cascade_counts_removed_evaluations() {
        let kept = Student::with_id(StudentId::from("keep"), "Kept", 1);
        let gone = Student::with_id(StudentId::from("gone"), "Gone", 2);
        let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mut db = Database {
            students: vec![kept.clone(), gone.clone()],
            evaluations: vec![
                Evaluation::for_day(gone.id.clone(), day),
                Evaluation::for_day(kept.id.clone(), day),
                Evaluation::for_day(gone.id.clone(), day.succ_opt().unwrap()),
            ],
        };

        assert_eq!(remove_student_cascade(&mut db, &gone.id), Some(2));
        assert_eq!(db.students, vec![kept.clone()]);
        assert_eq!(db.evaluations.len(), 1);
        assert_eq!(db.evaluations[0].student_id, kept.id);

        assert_eq!(remove_student_cascade(&mut db, &gone.id), None);
    }
}
