mod exercise;
mod user;
mod workout;

pub use exercise::{Exercise, ExerciseFields};
pub use user::{NewUser, User};
pub use workout::{Workout, WorkoutWithExercises};
