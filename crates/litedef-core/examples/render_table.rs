use litedef_core::{RawColumnSpec, TableSpec, render_add_column, render_table};

fn main() {
    let table = TableSpec::new("people")
        .with_column("name", RawColumnSpec::new().with("type", "text").with("mandatory", true))
        .with_column("email", RawColumnSpec::new().with("Type", "TEXT").with("unique", "true"));

    match render_table(&table) {
        Ok(sql) => println!("{sql};"),
        Err(err) => eprintln!("{err}"),
    }

    let age = RawColumnSpec::new().with("type", "integer").with("default", 0);
    match render_add_column(&table.name, "age", &age) {
        Ok(sql) => println!("{sql};"),
        Err(err) => eprintln!("{err}"),
    }
}
