//! Workout domain - generated programs, planned sessions, and performance
//! logs.

mod generated;
mod log;
mod program;

pub use generated::{GeneratedExercise, GeneratedProgram, GeneratedSession};
pub use log::{ExerciseSetLog, LoggedExercise, WorkoutLog};
pub use program::{
    ProgramStatus, SessionExercise, WorkoutProgram, WorkoutSession, PROGRAM_DURATION_DAYS,
};
