//! Sans-serif layout leading with the profile image and experience; skills
//! are grouped lines rather than chips.

use crate::models::{FontClass, ResumeRecord, StylePreferences};
use crate::render::{bullet_lines, contact_items, Block, Document, Template};

pub struct ModernTemplate;

impl Template for ModernTemplate {
    fn id(&self) -> &'static str {
        "modern-sleek"
    }

    fn name(&self) -> &'static str {
        "Modern Sleek"
    }

    fn render(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document {
        let mut doc = Document::new(styles, FontClass::Sans, FontClass::Sans);
        let body = styles.body_font_size;
        let subheading = styles.subheading_font_size;

        if !data.profile_picture.is_empty() {
            doc.push(Block::ProfileImage { height_px: 112.0 });
        }
        doc.push(Block::Heading {
            text: data.full_name.clone(),
            size_px: styles.heading_font_size,
        });
        doc.push(Block::Paragraph {
            text: data.title.clone(),
            size_px: subheading * 0.8,
        });

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

        if !data.about.is_empty() {
            doc.push(Block::Paragraph {
                text: data.about.clone(),
                size_px: body,
            });
            doc.push(Block::Spacer { height_px: 12.0 });
        }

        let experience: Vec<_> = data.experience.iter().filter(|e| !e.company.is_empty()).collect();
        if !experience.is_empty() {
            doc.push(Block::Subheading {
                text: "Experience".to_string(),
                size_px: subheading,
            });
            for exp in experience {
                doc.push(Block::Paragraph {
                    text: format!("{} — {} ({})", exp.role, exp.company, exp.date),
                    size_px: subheading * 0.85,
                });
                let lines = bullet_lines(&exp.description);
                if !lines.is_empty() {
                    doc.push(Block::Bullets {
                        items: lines,
                        size_px: body,
                    });
                }
            }
            doc.push(Block::Rule);
        }

        let projects: Vec<_> = data.projects.iter().filter(|p| !p.title.is_empty()).collect();
        if !projects.is_empty() {
            doc.push(Block::Subheading {
                text: "Projects".to_string(),
                size_px: subheading,
            });
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
            doc.push(Block::Rule);
        }

        let groups: Vec<_> = data.skills.iter().filter(|g| !g.skills.is_empty()).collect();
        if !groups.is_empty() {
            doc.push(Block::Subheading {
                text: "Skills".to_string(),
                size_px: subheading,
            });
            let items = groups
                .iter()
                .map(|g| {
                    if g.group_name.is_empty() {
                        g.skills.clone()
                    } else {
                        format!("{}: {}", g.group_name, g.skills)
                    }
                })
                .collect();
            doc.push(Block::Bullets {
                items,
                size_px: body,
            });
        }

        let education: Vec<_> = data.education.iter().filter(|e| !e.institution.is_empty()).collect();
        if !education.is_empty() {
            doc.push(Block::Subheading {
                text: "Education".to_string(),
                size_px: subheading,
            });
            for edu in education {
                doc.push(Block::Paragraph {
                    text: format!("{} — {} ({})", edu.institution, edu.degree, edu.date),
                    size_px: body,
                });
            }
        }

        let certificates: Vec<_> = data.certificates.iter().filter(|c| !c.name.is_empty()).collect();
        if !certificates.is_empty() {
            doc.push(Block::Subheading {
                text: "Certificates".to_string(),
                size_px: subheading,
            });
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
            doc.push(Block::Subheading {
                text: section.title.clone(),
                size_px: subheading,
            });
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
                    size_px: body,
                });
            }
        }

        doc
    }
}
