//! Stripped-down sans layout: no rules, no chips, tight spacing, skills
//! inlined as one line per group.

use crate::models::{FontClass, ResumeRecord, StylePreferences};
use crate::render::{bullet_lines, contact_items, Block, Document, Template};

pub struct MinimalistTemplate;

impl Template for MinimalistTemplate {
    fn id(&self) -> &'static str {
        "minimalist-clean"
    }

    fn name(&self) -> &'static str {
        "Minimalist"
    }

    fn render(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document {
        let mut doc = Document::new(styles, FontClass::Sans, FontClass::Sans);
        let body = styles.body_font_size;
        let subheading = styles.subheading_font_size;

        doc.push(Block::Heading {
            text: data.full_name.clone(),
            size_px: styles.heading_font_size * 0.9,
        });
        if !data.title.is_empty() {
            doc.push(Block::Paragraph {
                text: data.title.clone(),
                size_px: subheading * 0.75,
            });
        }
        let contacts = contact_items(data);
        if !contacts.is_empty() {
            doc.push(Block::ContactRow {
                items: contacts,
                size_px: body * 0.85,
            });
        }
        doc.push(Block::Spacer { height_px: 8.0 });

        if !data.about.is_empty() {
            doc.push(Block::Paragraph {
                text: data.about.clone(),
                size_px: body,
            });
            doc.push(Block::Spacer { height_px: 8.0 });
        }

        let groups: Vec<_> = data.skills.iter().filter(|g| !g.skills.is_empty()).collect();
        if !groups.is_empty() {
            doc.push(Block::Subheading {
                text: "Skills".to_string(),
                size_px: subheading * 0.9,
            });
            for group in groups {
                let line = if group.group_name.is_empty() {
                    group.skills.clone()
                } else {
                    format!("{}: {}", group.group_name, group.skills)
                };
                doc.push(Block::Paragraph {
                    text: line,
                    size_px: body,
                });
            }
        }

        let experience: Vec<_> = data.experience.iter().filter(|e| !e.company.is_empty()).collect();
        if !experience.is_empty() {
            doc.push(Block::Subheading {
                text: "Experience".to_string(),
                size_px: subheading * 0.9,
            });
            for exp in experience {
                doc.push(Block::Paragraph {
                    text: format!("{}, {} ({})", exp.role, exp.company, exp.date),
                    size_px: body,
                });
                let lines = bullet_lines(&exp.description);
                if !lines.is_empty() {
                    doc.push(Block::Bullets {
                        items: lines,
                        size_px: body * 0.95,
                    });
                }
            }
        }

        let projects: Vec<_> = data.projects.iter().filter(|p| !p.title.is_empty()).collect();
        if !projects.is_empty() {
            doc.push(Block::Subheading {
                text: "Projects".to_string(),
                size_px: subheading * 0.9,
            });
            for project in projects {
                let line = if project.description.is_empty() {
                    project.title.clone()
                } else {
                    format!("{} — {}", project.title, project.description)
                };
                doc.push(Block::Paragraph {
                    text: line,
                    size_px: body,
                });
            }
        }

        let education: Vec<_> = data.education.iter().filter(|e| !e.institution.is_empty()).collect();
        if !education.is_empty() {
            doc.push(Block::Subheading {
                text: "Education".to_string(),
                size_px: subheading * 0.9,
            });
            for edu in education {
                doc.push(Block::Paragraph {
                    text: format!("{}, {} ({})", edu.degree, edu.institution, edu.date),
                    size_px: body,
                });
            }
        }

        let certificates: Vec<_> = data.certificates.iter().filter(|c| !c.name.is_empty()).collect();
        if !certificates.is_empty() {
            doc.push(Block::Subheading {
                text: "Certificates".to_string(),
                size_px: subheading * 0.9,
            });
            for cert in certificates {
                doc.push(Block::Paragraph {
                    text: format!("{}, {} ({})", cert.name, cert.issuer, cert.date),
                    size_px: body,
                });
            }
        }

        for section in data
            .custom_sections
            .iter()
            .filter(|s| !s.title.is_empty() || !s.description.is_empty())
        {
            doc.push(Block::Subheading {
                text: section.title.clone(),
                size_px: subheading * 0.9,
            });
            let lines = bullet_lines(&section.description);
            if !lines.is_empty() {
                doc.push(Block::Bullets {
                    items: lines,
                    size_px: body * 0.95,
                });
            }
        }

        doc
    }
}
