mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use quiz_vm::{OptionVm, QuestionVm, QuizVm, option_letter};
pub use results_vm::{OptionMark, ResultItemVm, ResultOptionVm, ResultsVm};
pub use time_fmt::{TimerUrgency, format_countdown};
