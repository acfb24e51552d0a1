//! Statement extraction tests, against golden files in tests/scripts/extract/
use dbinit::error::Result;
use dbinit::extract;

use goldenfile::Mint;
use std::io::Write;

macro_rules! test_extract {
    ( $( $name:ident: $script:expr, )* ) => {
        $(
            #[test]
            fn $name() -> Result<()> {
                let mut mint = Mint::new("tests/scripts/extract");
                let mut f = mint.new_goldenfile(stringify!($name))?;

                write!(f, "Script:\n{}\n\n", $script.trim_end())?;
                write!(f, "Statements:\n")?;
                for statement in extract($script) {
                    write!(f, "{:?}\n", statement)?;
                }
                Ok(())
            }
        )*
    }
}

test_extract! {
    create_tables: "CREATE TABLE customer (\n    id SERIAL PRIMARY KEY,\n    name TEXT NOT NULL\n);\n\nCREATE TABLE orders (\n    id SERIAL PRIMARY KEY,\n    customer_id INT REFERENCES customer (id)\n);\n",
    comments_and_blanks: "-- schema for ${DB_NAME}\n\n  -- indented comment\nINSERT INTO customer (name) VALUES ('a');\n\n\nINSERT INTO customer (name) VALUES ('b');\n-- trailing comment\n",
    function_body: "CREATE OR REPLACE FUNCTION touch() RETURNS trigger AS $$\nBEGIN\n    -- keep the timestamp fresh;\n    NEW.updated = now();\n\n    RETURN NEW;\nEND;\n$$ LANGUAGE plpgsql;\n\nCREATE TRIGGER touch BEFORE UPDATE ON customer FOR EACH ROW EXECUTE PROCEDURE touch();\n",
    unterminated_trailer: "SELECT 1;\nSELECT 2\nFROM dual",
    unterminated_trailer_newline: "SELECT 1;\nSELECT 2\n",
    unbalanced_delimiter: "DO $$\nBEGIN\n    PERFORM 1;\nEND;\n",
    keyspace_tables: "CREATE TABLE ${DB_NAME}.events (\n    id uuid,\n    at timestamp,\n    PRIMARY KEY (id, at)\n) WITH CLUSTERING ORDER BY (at DESC);\nCREATE INDEX ON ${DB_NAME}.events (at);\n",
}
