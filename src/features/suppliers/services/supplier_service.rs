use crate::core::error::Result;
use crate::core::storage::Repository;
use crate::features::suppliers::dtos::{
    PatchSupplierDto, SupplierQueryParams, SupplierRequestDto, SupplierResponseDto,
};
use crate::features::suppliers::models::Supplier;
use crate::shared::pagination::Paged;
use crate::shared::query::TextMatch;

pub struct SupplierService {
    repo: Repository<Supplier>,
    text_match: TextMatch,
}

impl SupplierService {
    pub fn new(repo: Repository<Supplier>, text_match: TextMatch) -> Self {
        Self { repo, text_match }
    }

    pub async fn list(&self, params: &SupplierQueryParams) -> Result<Paged<SupplierResponseDto>> {
        let filter = params.to_filter(self.text_match);
        let page = self.repo.list(&filter, params.page_request()).await?;
        Ok(page.map(SupplierResponseDto::from))
    }

    pub async fn get(&self, id: i64) -> Result<SupplierResponseDto> {
        self.repo.get(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: SupplierRequestDto) -> Result<SupplierResponseDto> {
        let supplier = Supplier {
            name: dto.name,
            contact_person: dto.contact_person,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
            ..Default::default()
        };

        let created = self.repo.create(supplier).await?;
        tracing::info!("Supplier created: id={}", created.id);
        Ok(created.into())
    }

    /// Full replace: every field takes the value in `dto`
    pub async fn replace(&self, id: i64, dto: SupplierRequestDto) -> Result<()> {
        let mut supplier = self.repo.get(id).await?;
        supplier.name = dto.name;
        supplier.contact_person = dto.contact_person;
        supplier.email = dto.email;
        supplier.phone = dto.phone;
        supplier.address = dto.address;

        self.repo.save(supplier).await?;
        tracing::info!("Supplier updated: id={}", id);
        Ok(())
    }

    pub async fn patch(&self, id: i64, dto: PatchSupplierDto) -> Result<()> {
        let mut supplier = self.repo.get(id).await?;
        dto.apply(&mut supplier);

        self.repo.save(supplier).await?;
        tracing::info!("Supplier patched: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!("Supplier deleted: id={}", id);
        Ok(())
    }
}
