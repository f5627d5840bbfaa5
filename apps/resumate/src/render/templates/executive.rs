//! Formal layout: serif headings over sans body, uppercased section titles,
//! and the optional address and references sections.

use crate::models::{FontClass, ResumeRecord, StylePreferences};
use crate::render::{bullet_lines, contact_items, flatten_skills, Block, Document, Template};

pub struct ExecutiveTemplate;

impl ExecutiveTemplate {
    fn section_heading(doc: &mut Document, title: &str, styles: &StylePreferences) {
        doc.push(Block::Subheading {
            text: title.to_uppercase(),
            size_px: styles.subheading_font_size * 0.9,
        });
        doc.push(Block::Rule);
    }
}

impl Template for ExecutiveTemplate {
    fn id(&self) -> &'static str {
        "executive"
    }

    fn name(&self) -> &'static str {
        "Executive"
    }

    fn render(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document {
        let mut doc = Document::new(styles, FontClass::Serif, FontClass::Sans);
        let body = styles.body_font_size;
        let subheading = styles.subheading_font_size;

        doc.push(Block::Heading {
            text: data.full_name.clone(),
            size_px: styles.heading_font_size,
        });
        if !data.title.is_empty() {
            doc.push(Block::Paragraph {
                text: data.title.to_uppercase(),
                size_px: subheading * 0.75,
            });
        }

        let mut contacts = contact_items(data);
        if !data.address.is_empty() {
            contacts.push(data.address.clone());
        }
        if !contacts.is_empty() {
            doc.push(Block::ContactRow {
                items: contacts,
                size_px: body * 0.9,
            });
        }
        doc.push(Block::Rule);
        doc.push(Block::Spacer { height_px: 12.0 });

        if !data.about.is_empty() {
            Self::section_heading(&mut doc, "Profile", styles);
            doc.push(Block::Paragraph {
                text: data.about.clone(),
                size_px: body,
            });
        }

        let experience: Vec<_> = data.experience.iter().filter(|e| !e.company.is_empty()).collect();
        if !experience.is_empty() {
            Self::section_heading(&mut doc, "Professional Experience", styles);
            for exp in experience {
                doc.push(Block::Paragraph {
                    text: format!("{}, {}", exp.role, exp.company),
                    size_px: subheading * 0.85,
                });
                if !exp.date.is_empty() {
                    doc.push(Block::Paragraph {
                        text: exp.date.clone(),
                        size_px: body * 0.9,
                    });
                }
                let lines = bullet_lines(&exp.description);
                if !lines.is_empty() {
                    doc.push(Block::Bullets {
                        items: lines,
                        size_px: body,
                    });
                }
            }
        }

        let skills = flatten_skills(data);
        if !skills.is_empty() {
            Self::section_heading(&mut doc, "Core Competencies", styles);
            doc.push(Block::Chips {
                items: skills,
                size_px: body * 0.9,
            });
        }

        let projects: Vec<_> = data.projects.iter().filter(|p| !p.title.is_empty()).collect();
        if !projects.is_empty() {
            Self::section_heading(&mut doc, "Projects", styles);
            for project in projects {
                doc.push(Block::Paragraph {
                    text: project.title.clone(),
                    size_px: subheading * 0.85,
                });
                if !project.description.is_empty() {
                    doc.push(Block::Paragraph {
                        text: project.description.clone(),
                        size_px: body,
                    });
                }
            }
        }

        let education: Vec<_> = data.education.iter().filter(|e| !e.institution.is_empty()).collect();
        if !education.is_empty() {
            Self::section_heading(&mut doc, "Education", styles);
            for edu in education {
                doc.push(Block::Paragraph {
                    text: format!("{} — {} ({})", edu.degree, edu.institution, edu.date),
                    size_px: body,
                });
            }
        }

        let certificates: Vec<_> = data.certificates.iter().filter(|c| !c.name.is_empty()).collect();
        if !certificates.is_empty() {
            Self::section_heading(&mut doc, "Certifications", styles);
            for cert in certificates {
                doc.push(Block::Paragraph {
                    text: format!("{} — {} ({})", cert.name, cert.issuer, cert.date),
                    size_px: body,
                });
            }
        }

        for section in data
            .custom_sections
            .iter()
            .filter(|s| !s.title.is_empty() || !s.description.is_empty())
        {
            Self::section_heading(&mut doc, &section.title, styles);
            let lines = bullet_lines(&section.description);
            if !lines.is_empty() {
                doc.push(Block::Bullets {
                    items: lines,
                    size_px: body,
                });
            }
        }

        let references: Vec<_> = data.references.iter().filter(|r| !r.name.is_empty()).collect();
        if !references.is_empty() {
            Self::section_heading(&mut doc, "References", styles);
            for reference in references {
                let line = if reference.details.is_empty() {
                    reference.name.clone()
                } else {
                    format!("{} — {}", reference.name, reference.details)
                };
                doc.push(Block::Paragraph {
                    text: line,
                    size_px: body,
                });
            }
        }

        doc
    }
}
