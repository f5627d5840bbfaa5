//! Serializes a resume into the labeled text form the review prompt consumes.
//!
//! Collection entries are prefixed with their patch paths
//! (`experience.0.description: ...`) so the model can cite exactly the field
//! each suggestion targets. The section order and which sections are
//! conditional are part of the prompt contract and must not drift.

use std::fmt::Write;

use crate::models::ResumeRecord;

pub fn serialize_resume(data: &ResumeRecord) -> String {
    let mut text = String::from("RESUME\n\n");
    let _ = writeln!(text, "Name: {}", data.full_name);
    let _ = writeln!(text, "Title: {}\n", data.title);

    let _ = writeln!(text, "--- ABOUT ---\n{}\n", data.about);

    text.push_str("--- CONTACT ---\n");
    let _ = writeln!(text, "Email: {}", data.contact.email);
    let _ = writeln!(text, "Phone: {}", data.contact.phone);
    let _ = writeln!(text, "LinkedIn: {}", data.contact.linkedin);
    let _ = writeln!(text, "GitHub: {}\n", data.contact.github);

    let skills = data
        .skills
        .iter()
        .map(|s| format!("{}: {}", s.group_name, s.skills))
        .collect::<Vec<_>>()
        .join("\n");
    let _ = writeln!(text, "--- SKILLS ---\n{}\n", skills);

    text.push_str("--- EDUCATION ---\n");
    for (index, edu) in data.education.iter().enumerate() {
        let _ = writeln!(text, "education.{index}.degree: {}", edu.degree);
        let _ = writeln!(text, "education.{index}.institution: {}", edu.institution);
        let _ = writeln!(text, "education.{index}.date: {}\n", edu.date);
    }

    if !data.experience.is_empty() {
        text.push_str("--- EXPERIENCE ---\n");
        for (index, exp) in data.experience.iter().enumerate() {
            let _ = writeln!(text, "experience.{index}.company: {}", exp.company);
            let _ = writeln!(text, "experience.{index}.role: {}", exp.role);
            let _ = writeln!(text, "experience.{index}.date: {}", exp.date);
            let _ = writeln!(text, "experience.{index}.description: {}\n", exp.description);
        }
    }

    text.push_str("--- PROJECTS ---\n");
    for (index, proj) in data.projects.iter().enumerate() {
        let _ = writeln!(text, "projects.{index}.title: {}", proj.title);
        let _ = writeln!(text, "projects.{index}.description: {}", proj.description);
        if !proj.link.is_empty() {
            let _ = writeln!(text, "projects.{index}.link: {}", proj.link);
        }
        text.push('\n');
    }

    if !data.certificates.is_empty() {
        text.push_str("--- CERTIFICATES ---\n");
        for (index, cert) in data.certificates.iter().enumerate() {
            let _ = writeln!(text, "certificates.{index}.name: {}", cert.name);
            let _ = writeln!(text, "certificates.{index}.issuer: {}", cert.issuer);
            let _ = writeln!(text, "certificates.{index}.date: {}\n", cert.date);
        }
    }

    text
}
