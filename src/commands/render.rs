use fichas::{date_part, Ficha, FormController, FormMode, RecordStore, ReferenceDataLoader};

/// Program name, or the raw id when the list is unavailable.
pub fn program_label(reference: &ReferenceDataLoader, id: i64) -> String {
    reference
        .program_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id))
}

pub fn site_label(reference: &ReferenceDataLoader, id: i64) -> String {
    reference
        .site_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id))
}

fn truncate(value: String, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        value
    }
}

pub fn print_table(fichas: &[Ficha], reference: &ReferenceDataLoader) {
    println!(
        "{:<10}  {:<10}  {:<10}  {:<13}  {:<10}  {:<20}  SITE",
        "CODE", "STATUS", "START", "END CLASSWORK", "END RECORD", "PROGRAM"
    );
    println!("{}", "-".repeat(100));
    for ficha in fichas {
        println!(
            "{:<10}  {:<10}  {:<10}  {:<13}  {:<10}  {:<20}  {}",
            ficha.code,
            ficha.status,
            date_part(&ficha.start_date),
            date_part(&ficha.end_classwork_date),
            date_part(&ficha.end_record_date),
            truncate(program_label(reference, ficha.program_id), 20),
            site_label(reference, ficha.site_id)
        );
    }
    println!("\nTotal: {} ficha(s)", fichas.len());
}

/// Line shown instead of the table when there is nothing to list.
pub fn empty_list_message(store: &RecordStore) -> &'static str {
    if store.is_loaded() {
        "No fichas found"
    } else {
        "Fichas not loaded. Use 'reload' to try again."
    }
}

pub fn print_ficha(ficha: &Ficha, reference: &ReferenceDataLoader) {
    let title = format!("Ficha {}", ficha.code);
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("Status:        {}", ficha.status);
    println!("Start:         {}", date_part(&ficha.start_date));
    println!("End classwork: {}", date_part(&ficha.end_classwork_date));
    println!("End record:    {}", date_part(&ficha.end_record_date));
    println!("Program:       {}", program_label(reference, ficha.program_id));
    println!("Site:          {}", site_label(reference, ficha.site_id));
}

fn or_blank(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn print_draft(form: &FormController, reference: &ReferenceDataLoader) {
    match form.mode() {
        FormMode::Create => println!("New ficha"),
        FormMode::Edit { original } => println!("Editing ficha {}", original.code),
    }
    if form.is_in_flight() {
        println!("(saving...)");
    }

    let draft = form.draft();

    let code = if form.is_editing() {
        format!("{} (locked)", draft.code)
    } else {
        or_blank(&draft.code)
    };
    println!("  code:          {}", code);
    println!("  start:         {}", or_blank(&draft.start_date));
    println!("  end-classwork: {}", or_blank(&draft.end_classwork_date));
    println!("  end-record:    {}", or_blank(&draft.end_record_date));
    println!(
        "  program:       {}",
        draft
            .program_id
            .map(|id| program_label(reference, id))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  site:          {}",
        draft
            .site_id
            .map(|id| site_label(reference, id))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  status:        {}",
        draft
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("ADSO".to_string(), 20), "ADSO");
        assert_eq!(
            truncate("Análisis y Desarrollo de Software".to_string(), 20),
            "Análisis y Desarr..."
        );
    }

    struct EmptyServer;

    impl fichas::SyncClient for EmptyServer {
        async fn list(&self) -> Result<Vec<Ficha>, fichas::FichaError> {
            Ok(Vec::new())
        }

        async fn create(&self, ficha: &Ficha) -> Result<Ficha, fichas::FichaError> {
            Ok(ficha.clone())
        }

        async fn update(&self, _code: i64, ficha: &Ficha) -> Result<Ficha, fichas::FichaError> {
            Ok(ficha.clone())
        }

        async fn delete(&self, _code: i64) -> Result<(), fichas::FichaError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_list_message() {
        let mut store = RecordStore::new();
        assert!(empty_list_message(&store).contains("not loaded"));

        store.load(&EmptyServer).await.unwrap();
        assert_eq!(empty_list_message(&store), "No fichas found");
    }

    #[test]
    fn test_labels_fall_back_to_id() {
        let reference = ReferenceDataLoader::new();
        assert_eq!(program_label(&reference, 5), "#5");
        assert_eq!(site_label(&reference, 2), "#2");
    }
}
