pub mod resume;
pub mod styles;

pub use resume::{
    Certificate, Contact, CustomSection, Education, Experience, Project, Reference, ResumeRecord,
    SkillGroup,
};
pub use styles::{FontChoice, FontClass, StylePreferences};
