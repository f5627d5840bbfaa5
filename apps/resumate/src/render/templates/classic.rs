//! Centered serif layout: name and title over a ruled header, contact line,
//! then About / Skills / Experience / Projects / Certificates / custom
//! sections / Education.

use crate::models::{FontClass, ResumeRecord, StylePreferences};
use crate::render::{bullet_lines, contact_items, flatten_skills, Block, Document, Template};

pub struct ClassicTemplate;

impl ClassicTemplate {
    fn section_heading(doc: &mut Document, title: &str, styles: &StylePreferences) {
        doc.push(Block::Subheading {
            text: title.to_string(),
            size_px: styles.subheading_font_size,
        });
        doc.push(Block::Rule);
    }
}

impl Template for ClassicTemplate {
    fn id(&self) -> &'static str {
        "classic-professional"
    }

    fn name(&self) -> &'static str {
        "Classic Professional"
    }

    fn render(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document {
        let mut doc = Document::new(styles, FontClass::Serif, FontClass::Serif);
        let body = styles.body_font_size;
        let subheading = styles.subheading_font_size;

        doc.push(Block::Heading {
            text: data.full_name.clone(),
            size_px: styles.heading_font_size,
        });
        doc.push(Block::Paragraph {
            text: data.title.clone(),
            size_px: subheading * 0.8,
        });
        doc.push(Block::Rule);

        let contacts = contact_items(data);
        if !contacts.is_empty() {
            doc.push(Block::ContactRow {
                items: contacts,
                size_px: body * 0.9,
            });
        }
        doc.push(Block::Spacer { height_px: 16.0 });

        if !data.about.is_empty() {
            Self::section_heading(&mut doc, "About Me", styles);
            doc.push(Block::Paragraph {
                text: data.about.clone(),
                size_px: body,
            });
        }

        let skills = flatten_skills(data);
        if !skills.is_empty() {
            Self::section_heading(&mut doc, "Skills", styles);
            doc.push(Block::Chips {
                items: skills,
                size_px: body * 0.9,
            });
        }

        let experience: Vec<_> = data.experience.iter().filter(|e| !e.company.is_empty()).collect();
        if !experience.is_empty() {
            Self::section_heading(&mut doc, "Experience", styles);
            for exp in experience {
                doc.push(Block::Paragraph {
                    text: format!("{} at {}", exp.role, exp.company),
                    size_px: subheading * 0.85,
                });
                doc.push(Block::Paragraph {
                    text: exp.date.clone(),
                    size_px: body * 0.9,
                });
                let lines = bullet_lines(&exp.description);
                if !lines.is_empty() {
                    doc.push(Block::Bullets {
                        items: lines,
                        size_px: body * 0.9,
                    });
                }
            }
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
                if !project.link.is_empty() {
                    doc.push(Block::Paragraph {
                        text: project.link.clone(),
                        size_px: body * 0.9,
                    });
                }
            }
        }

        let certificates: Vec<_> = data.certificates.iter().filter(|c| !c.name.is_empty()).collect();
        if !certificates.is_empty() {
            Self::section_heading(&mut doc, "Certificates", styles);
            for cert in certificates {
                doc.push(Block::Paragraph {
                    text: cert.name.clone(),
                    size_px: subheading * 0.85,
                });
                doc.push(Block::Paragraph {
                    text: format!("{} — {}", cert.issuer, cert.date),
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
            if !section.subtitle.is_empty() {
                doc.push(Block::Paragraph {
                    text: section.subtitle.clone(),
                    size_px: subheading * 0.85,
                });
            }
            let lines = bullet_lines(&section.description);
            if !lines.is_empty() {
                doc.push(Block::Bullets {
                    items: lines,
                    size_px: body * 0.9,
                });
            }
        }

        let education: Vec<_> = data.education.iter().filter(|e| !e.institution.is_empty()).collect();
        if !education.is_empty() {
            Self::section_heading(&mut doc, "Education", styles);
            for edu in education {
                doc.push(Block::Paragraph {
                    text: edu.institution.clone(),
                    size_px: subheading * 0.85,
                });
                doc.push(Block::Paragraph {
                    text: format!("{} — {}", edu.degree, edu.date),
                    size_px: body,
                });
            }
        }

        doc
    }
}
