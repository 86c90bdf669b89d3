#[cfg(test)]
mod tests {
    use quarry::{
        Action, ColumnType, Config, EntitySchema, ForeignKeyRef, Generator, GenericSqlWriter,
        HostKind, RawFieldDecl, SqlWriter,
    };
    use quarry_tests::{Post, User, init_logs};

    const WRITER: GenericSqlWriter = GenericSqlWriter {};

    fn id() -> RawFieldDecl {
        RawFieldDecl::new("id", HostKind::I32)
            .column_type(ColumnType::Int)
            .primary_key()
    }

    fn user_id(reference: ForeignKeyRef) -> EntitySchema {
        EntitySchema::resolve(
            "Comment",
            None,
            [
                id(),
                RawFieldDecl::new("user_id", HostKind::I32)
                    .column_type(ColumnType::Int)
                    .foreign_key(reference),
            ],
        )
        .unwrap()
    }

    #[test]
    fn create_table_minimal() {
        init_logs();
        let schema = EntitySchema::resolve(
            "Entity",
            Some(""),
            [
                id(),
                RawFieldDecl::new("name", HostKind::String)
                    .column_type(ColumnType::Varchar)
                    .size(50),
            ],
        )
        .unwrap();
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &schema, false);
        assert_eq!(
            out,
            "CREATE TABLE `entity` (`id` INT PRIMARY KEY , `name` VARCHAR(50) )"
        );
        out.clear();
        WRITER.write_create_table(&mut out, &schema, true);
        assert_eq!(
            out,
            "CREATE TABLE IF NOT EXISTS `entity` (`id` INT PRIMARY KEY , `name` VARCHAR(50) )"
        );
    }

    #[test]
    fn create_table_constraints() {
        let unit = Generator::default().generate_entity(
            &User::decl().name,
            None,
            User::decl().fields,
        );
        let unit = unit.unwrap();
        assert_eq!(
            unit.create_table,
            "CREATE TABLE `user` (`id` INT PRIMARY KEY , \
                `name` VARCHAR(50) NOT NULL , \
                `email` VARCHAR(255) UNIQUE , \
                `active` BOOLEAN DEFAULT TRUE , \
                `score` DOUBLE )"
        );
    }

    #[test]
    fn create_table_foreign_keys() {
        let decl = Post::decl();
        let unit = Generator::default()
            .generate_entity(&decl.name, decl.table.as_deref(), decl.fields)
            .unwrap();
        assert_eq!(
            unit.create_table,
            "CREATE TABLE `blog_post` (`id` BIGINT PRIMARY KEY , \
                `user_id` INT NOT NULL , \
                `title` VARCHAR(120) NOT NULL , \
                `body` TEXT , \
                `created_at` TIMESTAMP , \
                FOREIGN KEY (`user_id`) REFERENCES `user`(`id`) ON DELETE CASCADE )"
        );
    }

    #[test]
    fn referential_actions() {
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &user_id(ForeignKeyRef::new("user", "id")), false);
        assert_eq!(
            out,
            "CREATE TABLE `comment` (`id` INT PRIMARY KEY , `user_id` INT , FOREIGN KEY (`user_id`) REFERENCES `user`(`id`) )"
        );
        assert!(!out.contains("ON DELETE"));

        out.clear();
        WRITER.write_create_table(
            &mut out,
            &user_id(
                ForeignKeyRef::new("user", "id")
                    .on_delete(Action::Restrict)
                    .on_update(Action::SetNull),
            ),
            false,
        );
        assert!(out.ends_with(
            "FOREIGN KEY (`user_id`) REFERENCES `user`(`id`) ON DELETE RESTRICT ON UPDATE SET NULL )"
        ));

        out.clear();
        WRITER.write_create_table(
            &mut out,
            &user_id(ForeignKeyRef::new("user", "id").on_update(Action::SetDefault)),
            false,
        );
        assert!(out.ends_with("REFERENCES `user`(`id`) ON UPDATE SET DEFAULT )"));
    }

    #[test]
    fn default_literals() {
        let schema = EntitySchema::resolve(
            "Defaults",
            None,
            [
                id(),
                RawFieldDecl::new("a", HostKind::I64)
                    .column_type(ColumnType::BigInt)
                    .default_value(-42i64),
                RawFieldDecl::new("b", HostKind::F32)
                    .column_type(ColumnType::Float)
                    .default_value(1.5f32),
                RawFieldDecl::new("c", HostKind::F64)
                    .column_type(ColumnType::Double)
                    .default_value(0.25),
                RawFieldDecl::new("d", HostKind::Bool)
                    .column_type(ColumnType::Boolean)
                    .default_value(false),
                RawFieldDecl::new("e", HostKind::String)
                    .column_type(ColumnType::Text)
                    .not_null()
                    .default_value("it's"),
            ],
        )
        .unwrap();
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &schema, false);
        assert_eq!(
            out,
            "CREATE TABLE `defaults` (`id` INT PRIMARY KEY , \
                `a` BIGINT DEFAULT -42 , \
                `b` FLOAT DEFAULT 1.5 , \
                `c` DOUBLE DEFAULT 0.25 , \
                `d` BOOLEAN DEFAULT FALSE , \
                `e` TEXT NOT NULL DEFAULT 'it''s' )"
        );
    }

    #[test]
    fn quoted_identifiers() {
        let schema = EntitySchema::resolve(
            "Odd",
            Some("we`ird"),
            [RawFieldDecl::new("id", HostKind::I32)
                .column_type(ColumnType::Int)
                .column_name("a`b")
                .primary_key()],
        )
        .unwrap();
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &schema, false);
        assert_eq!(out, "CREATE TABLE `we``ird` (`a``b` INT PRIMARY KEY )");
        out.clear();
        WRITER.write_drop_table(&mut out, &schema, true);
        assert_eq!(out, "DROP TABLE IF EXISTS `we``ird`");
    }

    #[test]
    fn drop_table() {
        let decl = User::decl();
        let unit = Generator::default()
            .generate_entity(&decl.name, None, decl.fields.clone())
            .unwrap();
        assert_eq!(unit.drop_table, "DROP TABLE IF EXISTS `user`");

        let unit = Generator::new(Config::default().drop_if_exists(false).create_if_not_exists(true))
            .generate_entity(&decl.name, None, decl.fields)
            .unwrap();
        assert_eq!(unit.drop_table, "DROP TABLE `user`");
        assert!(unit.create_table.starts_with("CREATE TABLE IF NOT EXISTS `user` ("));
    }
}
