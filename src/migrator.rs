use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_menu_tables::Migration),
            Box::new(m20250301_000002_create_contract_tables::Migration),
            Box::new(m20250301_000003_create_dish_tables::Migration),
            Box::new(m20250301_000004_create_necessity_records_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250301_000001_create_menu_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_menu_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Menus::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Menus::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Menus::Name).string().not_null())
                        .col(ColumnDef::new(Menus::ReferenceMonth).integer().not_null())
                        .col(ColumnDef::new(Menus::ReferenceYear).integer().not_null())
                        .col(
                            ColumnDef::new(Menus::WeekCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Menus::Status).string_len(16).not_null())
                        .col(
                            ColumnDef::new(Menus::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Menus::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuBranches::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(MenuBranches::MenuId).big_integer().not_null())
                        .col(
                            ColumnDef::new(MenuBranches::BranchId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MenuBranches::BranchName).string().null())
                        .primary_key(
                            Index::create()
                                .col(MenuBranches::MenuId)
                                .col(MenuBranches::BranchId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_branches_menu_id")
                                .from(MenuBranches::Table, MenuBranches::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuCostCenters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuCostCenters::MenuId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuCostCenters::CostCenterId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuCostCenters::CostCenterName)
                                .string()
                                .null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(MenuCostCenters::MenuId)
                                .col(MenuCostCenters::CostCenterId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_cost_centers_menu_id")
                                .from(MenuCostCenters::Table, MenuCostCenters::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuContracts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuContracts::MenuId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuContracts::ContractId)
                                .big_integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(MenuContracts::MenuId)
                                .col(MenuContracts::ContractId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_contracts_menu_id")
                                .from(MenuContracts::Table, MenuContracts::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuCommercialProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuCommercialProducts::MenuId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuCommercialProducts::CommercialProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuCommercialProducts::CommercialName)
                                .string()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(MenuCommercialProducts::MenuId)
                                .col(MenuCommercialProducts::CommercialProductId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_commercial_products_menu_id")
                                .from(MenuCommercialProducts::Table, MenuCommercialProducts::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuPeriods::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(MenuPeriods::MenuId).big_integer().not_null())
                        .col(
                            ColumnDef::new(MenuPeriods::PeriodId)
                                .big_integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(MenuPeriods::MenuId)
                                .col(MenuPeriods::PeriodId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_periods_menu_id")
                                .from(MenuPeriods::Table, MenuPeriods::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuPlanEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuPlanEntries::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MenuPlanEntries::MenuId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MenuPlanEntries::Date).date().not_null())
                        .col(
                            ColumnDef::new(MenuPlanEntries::DishId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuPlanEntries::CommercialProductId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MenuPlanEntries::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_plan_entries_menu_id")
                                .from(MenuPlanEntries::Table, MenuPlanEntries::MenuId)
                                .to(Menus::Table, Menus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_menu_plan_entries_menu_date")
                        .table(MenuPlanEntries::Table)
                        .col(MenuPlanEntries::MenuId)
                        .col(MenuPlanEntries::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MenuPlanEntries::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuPeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuCommercialProducts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuContracts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuCostCenters::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuBranches::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Menus::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Menus {
        Table,
        Id,
        Name,
        ReferenceMonth,
        ReferenceYear,
        WeekCount,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum MenuBranches {
        Table,
        MenuId,
        BranchId,
        BranchName,
    }

    #[derive(DeriveIden)]
    enum MenuCostCenters {
        Table,
        MenuId,
        CostCenterId,
        CostCenterName,
    }

    #[derive(DeriveIden)]
    enum MenuContracts {
        Table,
        MenuId,
        ContractId,
    }

    #[derive(DeriveIden)]
    enum MenuCommercialProducts {
        Table,
        MenuId,
        CommercialProductId,
        CommercialName,
    }

    #[derive(DeriveIden)]
    enum MenuPeriods {
        Table,
        MenuId,
        PeriodId,
    }

    #[derive(DeriveIden)]
    enum MenuPlanEntries {
        Table,
        Id,
        MenuId,
        Date,
        DishId,
        CommercialProductId,
        DisplayOrder,
    }
}

mod m20250301_000002_create_contract_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_contract_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Contracts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Contracts::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Contracts::Name).string().not_null())
                        .col(ColumnDef::new(Contracts::BranchId).big_integer().not_null())
                        .col(ColumnDef::new(Contracts::BranchName).string().not_null())
                        .col(
                            ColumnDef::new(Contracts::CostCenterId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Contracts::CostCenterName).string().not_null())
                        .col(ColumnDef::new(Contracts::Status).string_len(16).not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ContractUnits::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContractUnits::ContractId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ContractUnits::UnitId).big_integer().not_null())
                        .col(ColumnDef::new(ContractUnits::UnitName).string().not_null())
                        .col(ColumnDef::new(ContractUnits::Status).string_len(16).not_null())
                        .primary_key(
                            Index::create()
                                .col(ContractUnits::ContractId)
                                .col(ContractUnits::UnitId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contract_units_contract_id")
                                .from(ContractUnits::Table, ContractUnits::ContractId)
                                .to(Contracts::Table, Contracts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AttendancePeriods::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AttendancePeriods::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(AttendancePeriods::Name).string().not_null())
                        .col(
                            ColumnDef::new(AttendancePeriods::Status)
                                .string_len(16)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UnitPeriods::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(UnitPeriods::UnitId).big_integer().not_null())
                        .col(ColumnDef::new(UnitPeriods::PeriodId).big_integer().not_null())
                        .col(ColumnDef::new(UnitPeriods::Status).string_len(16).not_null())
                        .primary_key(
                            Index::create()
                                .col(UnitPeriods::UnitId)
                                .col(UnitPeriods::PeriodId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_unit_periods_period_id")
                                .from(UnitPeriods::Table, UnitPeriods::PeriodId)
                                .to(AttendancePeriods::Table, AttendancePeriods::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AverageDemands::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AverageDemands::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(AverageDemands::UnitId).big_integer().not_null())
                        .col(
                            ColumnDef::new(AverageDemands::PeriodId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AverageDemands::Average)
                                .decimal_len(14, 3)
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_average_demands_unit_period")
                        .table(AverageDemands::Table)
                        .col(AverageDemands::UnitId)
                        .col(AverageDemands::PeriodId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AverageDemands::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UnitPeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(AttendancePeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ContractUnits::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Contracts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Contracts {
        Table,
        Id,
        Name,
        BranchId,
        BranchName,
        CostCenterId,
        CostCenterName,
        Status,
    }

    #[derive(DeriveIden)]
    enum ContractUnits {
        Table,
        ContractId,
        UnitId,
        UnitName,
        Status,
    }

    #[derive(DeriveIden)]
    enum AttendancePeriods {
        Table,
        Id,
        Name,
        Status,
    }

    #[derive(DeriveIden)]
    enum UnitPeriods {
        Table,
        UnitId,
        PeriodId,
        Status,
    }

    #[derive(DeriveIden)]
    enum AverageDemands {
        Table,
        Id,
        UnitId,
        PeriodId,
        Average,
    }
}

mod m20250301_000003_create_dish_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_dish_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Dishes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Dishes::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Dishes::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            // Bill of materials per dish and cost center
            manager
                .create_table(
                    Table::create()
                        .table(DishProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DishProducts::Id)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DishProducts::DishId).big_integer().not_null())
                        .col(
                            ColumnDef::new(DishProducts::CostCenterId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DishProducts::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DishProducts::ProductName).string().not_null())
                        .col(ColumnDef::new(DishProducts::UnitSymbol).string().not_null())
                        .col(
                            ColumnDef::new(DishProducts::PerCapita)
                                .decimal_len(14, 6)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_dish_products_dish_id")
                                .from(DishProducts::Table, DishProducts::DishId)
                                .to(Dishes::Table, Dishes::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_dish_products_dish_cost_center")
                        .table(DishProducts::Table)
                        .col(DishProducts::DishId)
                        .col(DishProducts::CostCenterId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DishProducts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Dishes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Dishes {
        Table,
        Id,
        Name,
    }

    #[derive(DeriveIden)]
    enum DishProducts {
        Table,
        Id,
        DishId,
        CostCenterId,
        ProductId,
        ProductName,
        UnitSymbol,
        PerCapita,
    }
}

mod m20250301_000004_create_necessity_records_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_necessity_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(NecessityRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(NecessityRecords::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::MenuId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(NecessityRecords::MenuName).string().not_null())
                        .col(
                            ColumnDef::new(NecessityRecords::ReferenceMonth)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::ReferenceYear)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::BranchId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::BranchName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::CostCenterId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::CostCenterName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::ContractId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::ContractName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::CommercialProductId)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::CommercialProductName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::UnitId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(NecessityRecords::UnitName).string().not_null())
                        .col(
                            ColumnDef::new(NecessityRecords::PeriodId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::PeriodName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(NecessityRecords::Date).date().not_null())
                        .col(
                            ColumnDef::new(NecessityRecords::DishId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(NecessityRecords::DishName).string().not_null())
                        .col(
                            ColumnDef::new(NecessityRecords::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::ProductUnit)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::PerCapita)
                                .decimal_len(14, 6)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::AverageDemand)
                                .decimal_len(14, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::Quantity)
                                .decimal_len(16, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::GeneratedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(NecessityRecords::GeneratedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Replacement deletes by the generation key
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_necessity_records_generation_key")
                        .table(NecessityRecords::Table)
                        .col(NecessityRecords::MenuId)
                        .col(NecessityRecords::BranchId)
                        .col(NecessityRecords::CostCenterId)
                        .col(NecessityRecords::ContractId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_necessity_records_date")
                        .table(NecessityRecords::Table)
                        .col(NecessityRecords::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(NecessityRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum NecessityRecords {
        Table,
        Id,
        MenuId,
        MenuName,
        ReferenceMonth,
        ReferenceYear,
        BranchId,
        BranchName,
        CostCenterId,
        CostCenterName,
        ContractId,
        ContractName,
        CommercialProductId,
        CommercialProductName,
        UnitId,
        UnitName,
        PeriodId,
        PeriodName,
        Date,
        DishId,
        DishName,
        ProductId,
        ProductName,
        ProductUnit,
        PerCapita,
        AverageDemand,
        Quantity,
        DisplayOrder,
        GeneratedBy,
        GeneratedAt,
    }
}
